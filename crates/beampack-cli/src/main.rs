use std::path::PathBuf;

use clap::Parser;

use beampack_core::Strategy;
use beampack_placement::OutputFormat;

mod commands;

#[derive(Parser)]
#[command(
    name = "beampack",
    about = "Pack neighbouring sky beams onto the same compute node",
    version
)]
struct Cli {
    /// Beam position file: one `x<TAB>y` record per line
    #[arg(required_unless_present = "print_config")]
    input: Option<PathBuf>,

    /// Beams per compute node
    #[arg(long)]
    bunch: Option<usize>,

    /// Multicast group id given to node 0
    #[arg(long)]
    multicast_base: Option<u32>,

    /// Ordering strategy: hilbert, morton, strips or greedy
    #[arg(long)]
    strategy: Option<Strategy>,

    /// Strip width for the strips strategy, in catalog units
    #[arg(long)]
    strip_width: Option<f64>,

    /// Only pack the first N beams of the catalog
    #[arg(long, value_name = "N")]
    max_beams: Option<usize>,

    /// Output format: text, json or tsv
    #[arg(short, long, default_value = "text")]
    format: OutputFormat,

    /// TOML configuration file with a [packing] table
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write the assignment to FILE instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    print_config: bool,

    /// Only log warnings and errors
    #[arg(short, long)]
    quiet: bool,
}

impl Cli {
    /// Default log directive, used when RUST_LOG does not say otherwise.
    fn log_directive(&self) -> &'static str {
        if self.quiet { "beampack=warn" } else { "beampack=info" }
    }

    fn overrides(&self) -> commands::pack::Overrides {
        commands::pack::Overrides {
            bunch: self.bunch,
            multicast_base: self.multicast_base,
            strategy: self.strategy,
            strip_width: self.strip_width,
            max_beams: self.max_beams,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(cli.log_directive().parse()?),
        )
        .init();

    let config = commands::pack::resolve_config(cli.config.as_deref(), &cli.overrides())?;

    if cli.print_config {
        return commands::pack::print_config(&config);
    }

    match cli.input {
        Some(input) => commands::pack::run(&input, &config, cli.format, cli.output.as_deref()),
        None => anyhow::bail!("no input file given"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_map_to_overrides() {
        let cli = Cli::try_parse_from([
            "beampack",
            "beams.dat",
            "--bunch",
            "4",
            "--multicast-base",
            "32",
            "--strategy",
            "strips",
            "--strip-width",
            "0.25",
            "--max-beams",
            "396",
        ])
        .unwrap();

        assert_eq!(cli.input, Some(PathBuf::from("beams.dat")));
        let overrides = cli.overrides();
        assert_eq!(overrides.bunch, Some(4));
        assert_eq!(overrides.multicast_base, Some(32));
        assert_eq!(overrides.strategy, Some(Strategy::Strips));
        assert_eq!(overrides.strip_width, Some(0.25));
        assert_eq!(overrides.max_beams, Some(396));
    }

    #[test]
    fn no_flags_no_overrides() {
        let cli = Cli::try_parse_from(["beampack", "beams.dat"]).unwrap();
        let overrides = cli.overrides();

        assert!(overrides.bunch.is_none());
        assert!(overrides.multicast_base.is_none());
        assert!(overrides.strategy.is_none());
        assert!(overrides.strip_width.is_none());
        assert!(overrides.max_beams.is_none());
        assert_eq!(cli.format, OutputFormat::Text);
        assert!(!cli.print_config);
    }

    #[test]
    fn output_options() {
        let cli = Cli::try_parse_from([
            "beampack", "beams.dat", "-f", "json", "-o", "out.json", "-c", "beampack.toml",
        ])
        .unwrap();

        assert_eq!(cli.format, OutputFormat::Json);
        assert_eq!(cli.output, Some(PathBuf::from("out.json")));
        assert_eq!(cli.config, Some(PathBuf::from("beampack.toml")));
    }

    #[test]
    fn print_config_needs_no_input() {
        let cli = Cli::try_parse_from(["beampack", "--print-config"]).unwrap();
        assert!(cli.print_config);
        assert!(cli.input.is_none());
    }

    #[test]
    fn input_required_otherwise() {
        assert!(Cli::try_parse_from(["beampack"]).is_err());
    }

    #[test]
    fn rejects_unknown_strategy_and_format() {
        assert!(Cli::try_parse_from(["beampack", "beams.dat", "--strategy", "foo"]).is_err());
        assert!(Cli::try_parse_from(["beampack", "beams.dat", "--format", "csv"]).is_err());
        assert!(Cli::try_parse_from(["beampack", "beams.dat", "--bunch", "-1"]).is_err());
    }

    #[test]
    fn quiet_lowers_log_level() {
        let cli = Cli::try_parse_from(["beampack", "beams.dat"]).unwrap();
        assert_eq!(cli.log_directive(), "beampack=info");

        let cli = Cli::try_parse_from(["beampack", "beams.dat", "-q"]).unwrap();
        assert_eq!(cli.log_directive(), "beampack=warn");
    }

    #[test]
    fn clap_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
