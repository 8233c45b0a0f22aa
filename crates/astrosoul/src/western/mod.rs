pub mod houses;
pub mod signs;

pub use houses::{flat_cusps, house_of};
pub use signs::{
    degree_in_sign, normalize_degrees, sign_of, sign_position, Element, Sign, SignPosition,
};
