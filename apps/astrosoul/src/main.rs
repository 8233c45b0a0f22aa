use anyhow::Context;
use astrosoul::{
    BirthData, ChartAssembler, ChartOptions, FixedOracle, GeoLocation, HouseSystem,
    PositionOracle, SwissEphemerisAdapter,
};
use astrosoul_config::{load_settings, AstroSoulSettings};
use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OracleKind {
    /// Swiss Ephemeris data files.
    Swiss,
    /// Built-in reference positions (2004-02-12, Akola); no data files needed.
    Fixed,
}

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Config file (otherwise configs/astrosoul.toml or ../../configs/astrosoul.toml).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Ephemeris data directory; overrides config and SWISS_EPHEMERIS_PATH.
    #[arg(long, global = true)]
    ephe_path: Option<PathBuf>,

    /// House system name, e.g. placidus, koch, whole_sign.
    #[arg(long, global = true)]
    house_system: Option<String>,

    /// Include Chiron, the North Node and the main asteroids.
    #[arg(long, global = true)]
    minor: bool,

    #[arg(long, value_enum, global = true, default_value_t = OracleKind::Swiss)]
    oracle: OracleKind,

    /// Pretty-print the JSON output.
    #[arg(long, global = true)]
    pretty: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Assemble one natal chart.
    Chart {
        #[command(flatten)]
        birth: BirthArgs,
    },
    /// Score the compatibility of two charts.
    Compat {
        #[command(flatten)]
        birth: BirthArgs,
        #[command(flatten)]
        partner: PartnerArgs,
    },
    /// Lunar phase and tight-orb aspects.
    Advanced {
        #[command(flatten)]
        birth: BirthArgs,
    },
}

#[derive(ClapArgs, Debug)]
struct BirthArgs {
    #[arg(long, default_value = "")]
    name: String,
    /// Birth date, e.g. 2004-02-12 or "February 12, 2004".
    #[arg(long)]
    date: String,
    /// Local clock time, e.g. 11:25 or "11:25 AM".
    #[arg(long)]
    time: String,
    #[arg(long, default_value = "")]
    city: String,
    #[arg(long, allow_hyphen_values = true)]
    lat: Option<f64>,
    #[arg(long, allow_hyphen_values = true)]
    lng: Option<f64>,
    /// IANA zone name; guessed from longitude when omitted.
    #[arg(long)]
    tz: Option<String>,
}

#[derive(ClapArgs, Debug)]
struct PartnerArgs {
    #[arg(long, default_value = "")]
    partner_name: String,
    #[arg(long)]
    partner_date: String,
    #[arg(long)]
    partner_time: String,
    #[arg(long, default_value = "")]
    partner_city: String,
    #[arg(long, allow_hyphen_values = true)]
    partner_lat: Option<f64>,
    #[arg(long, allow_hyphen_values = true)]
    partner_lng: Option<f64>,
    #[arg(long)]
    partner_tz: Option<String>,
}

fn birth_data(
    name: String,
    date: String,
    time: String,
    city: String,
    lat: Option<f64>,
    lng: Option<f64>,
    tz: Option<String>,
) -> BirthData {
    BirthData {
        name,
        date,
        time,
        city,
        coordinates: lat.zip(lng).map(|(lat, lon)| GeoLocation { lat, lon }),
        timezone: tz,
    }
}

impl From<BirthArgs> for BirthData {
    fn from(a: BirthArgs) -> Self {
        birth_data(a.name, a.date, a.time, a.city, a.lat, a.lng, a.tz)
    }
}

impl From<PartnerArgs> for BirthData {
    fn from(a: PartnerArgs) -> Self {
        birth_data(
            a.partner_name,
            a.partner_date,
            a.partner_time,
            a.partner_city,
            a.partner_lat,
            a.partner_lng,
            a.partner_tz,
        )
    }
}

fn chart_options(args: &Args, settings: &AstroSoulSettings) -> anyhow::Result<ChartOptions> {
    let name = args.house_system.as_deref().unwrap_or(settings.house_system.as_str());
    let house_system = HouseSystem::from_name(name).ok_or_else(|| {
        anyhow::anyhow!(
            "Unknown house system {:?} (expected one of {:?})",
            name,
            HouseSystem::ALL.map(|hs| hs.name())
        )
    })?;
    Ok(ChartOptions {
        house_system,
        include_minor_bodies: args.minor || settings.include_minor_bodies,
    })
}

fn build_oracle(kind: OracleKind, path: PathBuf) -> anyhow::Result<Box<dyn PositionOracle>> {
    let oracle: Box<dyn PositionOracle> = match kind {
        OracleKind::Swiss => Box::new(
            SwissEphemerisAdapter::new(path.clone())
                .with_context(|| format!("Cannot use ephemeris data at {}", path.display()))?,
        ),
        OracleKind::Fixed => {
            log::info!("Using built-in reference positions");
            Box::new(FixedOracle::reference())
        }
    };
    Ok(oracle)
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> anyhow::Result<()> {
    let text = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{}", text);
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut settings = load_settings(args.config.as_deref())?;
    if let Some(path) = &args.ephe_path {
        settings.ephemeris_path = path.clone();
    }
    let options = chart_options(&args, &settings)?;
    let oracle = build_oracle(args.oracle, settings.ephemeris_path.clone())?;
    let assembler = ChartAssembler::with_options(oracle, options);
    let pretty = args.pretty;

    match args.command {
        Command::Chart { birth } => {
            let chart = assembler.assemble(&birth.into())?;
            print_json(&chart, pretty)
        }
        Command::Compat { birth, partner } => {
            let report = assembler.compatibility(&birth.into(), &partner.into())?;
            print_json(&report, pretty)
        }
        Command::Advanced { birth } => {
            let analysis = assembler.advanced_analysis(&birth.into())?;
            print_json(&analysis, pretty)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compat_flags_parse() {
        let args = Args::try_parse_from([
            "astrosoul",
            "compat",
            "--date",
            "2004-02-12",
            "--time",
            "11:25",
            "--lat",
            "20.7",
            "--lng",
            "77.0",
            "--partner-date",
            "1990-07-04",
            "--partner-time",
            "3:15 PM",
            "--partner-lat",
            "40.7",
            "--partner-lng",
            "-74.0",
            "--oracle",
            "fixed",
        ])
        .unwrap();
        let Command::Compat { birth, partner } = args.command else {
            panic!("expected compat");
        };
        let a: BirthData = birth.into();
        let b: BirthData = partner.into();
        assert_eq!(a.coordinates, Some(GeoLocation { lat: 20.7, lon: 77.0 }));
        assert_eq!(b.coordinates, Some(GeoLocation { lat: 40.7, lon: -74.0 }));
        assert_eq!(b.time, "3:15 PM");
    }

    #[test]
    fn test_missing_longitude_means_no_coordinates() {
        let args =
            Args::try_parse_from(["astrosoul", "chart", "--date", "2004-02-12", "--time", "11:25", "--lat", "20.7"])
                .unwrap();
        let Command::Chart { birth } = args.command else {
            panic!("expected chart");
        };
        assert_eq!(BirthData::from(birth).coordinates, None);
    }

    #[test]
    fn test_house_system_flag_beats_config() {
        let args = Args::try_parse_from([
            "astrosoul",
            "--house-system",
            "koch",
            "chart",
            "--date",
            "2004-02-12",
            "--time",
            "11:25",
        ])
        .unwrap();
        let options = chart_options(&args, &AstroSoulSettings::default()).unwrap();
        assert_eq!(options.house_system, HouseSystem::Koch);
        assert!(!options.include_minor_bodies);
    }

    #[test]
    fn test_unknown_house_system_is_rejected() {
        let settings = AstroSoulSettings {
            house_system: "topocentric-ish".to_string(),
            ..AstroSoulSettings::default()
        };
        let args = Args::try_parse_from(["astrosoul", "chart", "--date", "x", "--time", "y"]).unwrap();
        assert!(chart_options(&args, &settings).is_err());
    }
}
