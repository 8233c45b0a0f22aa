pub mod assembler;
pub mod types;

pub use assembler::{ChartAngles, ChartAssembler};
pub use types::{
    AnglePoint, BirthData, Chart, ChartMetadata, ChartOptions, HouseCusp, PlanetPosition,
};
