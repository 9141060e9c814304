use clap::{Args, Parser, Subcommand, ValueEnum};
use std::io;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::filter::LevelFilter;
use whrs_app::{
    AppError, AppResult, CrossCheck, ReportRow, RowCheck, SweepDefinition, SweepOutcome,
    SweepType, run_sweep, write_csv, write_json,
};
use whrs_cycle::{OperatingPoint, OperatingVariable, OrcTurbineOutlet, ParamVector, WhrsEvaluator};
use whrs_fluids::{CachePolicy, CoolPropEngine, FluidRegistry};

#[derive(Parser)]
#[command(name = "whrs")]
#[command(about = "WHRS - marine engine waste heat recovery cycle evaluator", long_about = None)]
struct Cli {
    /// Property cache policy
    #[arg(long, value_enum, default_value_t = CacheMode::Memory, global = true)]
    cache: CacheMode,

    /// Property cache file used with `--cache file`
    #[arg(long, default_value = "whrs_props_cache.json", global = true)]
    cache_file: PathBuf,

    /// Override a validity range, e.g. `Load=60:100` (repeatable)
    #[arg(long = "range", value_parser = parse_range, global = true)]
    ranges: Vec<(OperatingVariable, f64, f64)>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate one operating point
    Evaluate {
        #[command(flatten)]
        point: PointArgs,
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// List the ORC working fluids
    Fluids,
    /// Print the parameter vector CSV header
    Header,
    /// Sweep one variable from a base operating point
    Sweep {
        #[command(flatten)]
        point: PointArgs,
        /// Variable to sweep (Load, JW_pump, RC_Superheat, ...)
        #[arg(long = "var", value_parser = parse_variable)]
        variable: OperatingVariable,
        #[arg(long)]
        start: f64,
        #[arg(long)]
        end: f64,
        #[arg(long, default_value_t = 11)]
        points: usize,
        /// Logarithmic spacing
        #[arg(long)]
        log: bool,
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Re-evaluate the cases of a CSV file and report differences
    CheckCsv {
        csv_path: PathBuf,
        /// Column indices to drop before comparing
        #[arg(long, value_delimiter = ',', default_values_t = [23usize, 25, 26])]
        drop: Vec<usize>,
        #[arg(long, default_value_t = 1e-5)]
        tolerance: f64,
        /// ORC turbine outlet formula used to re-evaluate the rows
        #[arg(long, value_enum, default_value_t = OutletMode::Legacy)]
        orc_outlet: OutletMode,
    },
}

#[derive(Args, Clone)]
struct PointArgs {
    #[arg(long, default_value_t = 60.0)]
    load: f64,
    /// Jacket water pump pressure rise [bar]
    #[arg(long, default_value_t = 3.15)]
    jw_pump: f64,
    #[arg(long, default_value_t = 8.0222)]
    rc_superheat: f64,
    #[arg(long, default_value_t = 1e-4)]
    rc_subcool: f64,
    #[arg(long, default_value_t = 1e-3)]
    orc_superheat: f64,
    #[arg(long, default_value_t = 1e-3)]
    orc_subcool: f64,
    /// ORC pump pressure rise [bar]
    #[arg(long, default_value_t = 6.6)]
    orc_pump: f64,
    /// Desalination chamber pressure [bar]
    #[arg(long, default_value_t = 0.2)]
    p_chamber: f64,
    /// ORC working fluid, by index or name
    #[arg(long)]
    fluid: Option<String>,
}

#[derive(Clone, Copy, ValueEnum)]
enum CacheMode {
    None,
    Memory,
    File,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutletMode {
    Efficiency,
    Legacy,
}

impl From<OutletMode> for OrcTurbineOutlet {
    fn from(mode: OutletMode) -> Self {
        match mode {
            OutletMode::Efficiency => OrcTurbineOutlet::Efficiency,
            OutletMode::Legacy => OrcTurbineOutlet::Legacy,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Csv,
    Json,
}

fn main() -> AppResult<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        _ => LevelFilter::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();

    match &cli.command {
        Commands::Evaluate { point, format } => cmd_evaluate(&cli, point, *format),
        Commands::Fluids => cmd_fluids(),
        Commands::Header => {
            println!("{}", ParamVector::header());
            Ok(())
        }
        Commands::Sweep {
            point,
            variable,
            start,
            end,
            points,
            log,
            format,
        } => {
            let sweep_type = if *log {
                SweepType::Logarithmic
            } else {
                SweepType::Linear
            };
            let def = SweepDefinition::new(*variable, *start, *end, *points, sweep_type)?;
            cmd_sweep(&cli, point, &def, *format)
        }
        Commands::CheckCsv {
            csv_path,
            drop,
            tolerance,
            orc_outlet,
        } => cmd_check_csv(&cli, csv_path, drop, *tolerance, *orc_outlet),
    }
}

fn build_evaluator(cli: &Cli) -> AppResult<WhrsEvaluator<CoolPropEngine>> {
    let policy = match cli.cache {
        CacheMode::None => CachePolicy::None,
        CacheMode::Memory => CachePolicy::Memory,
        CacheMode::File => CachePolicy::File(cli.cache_file.clone()),
    };
    let mut ev = WhrsEvaluator::new(CoolPropEngine::new(), policy)?;
    for &(var, min, max) in &cli.ranges {
        ev.ranges_mut().set(var, min, max)?;
    }
    info!(cached = ev.cache().len(), "evaluator ready");
    Ok(ev)
}

fn operating_point(args: &PointArgs, fluids: &FluidRegistry) -> AppResult<OperatingPoint> {
    let fluid = match &args.fluid {
        None => None,
        Some(s) => match s.parse::<i64>() {
            Ok(index) => Some(index),
            Err(_) => Some(fluids.find(s)? as i64),
        },
    };
    Ok(OperatingPoint {
        load: args.load,
        jw_pump: args.jw_pump,
        rc_superheat: args.rc_superheat,
        rc_subcool: args.rc_subcool,
        orc_superheat: args.orc_superheat,
        orc_subcool: args.orc_subcool,
        orc_pump: args.orc_pump,
        p_chamber: args.p_chamber,
        fluid,
    })
}

fn cmd_evaluate(cli: &Cli, args: &PointArgs, format: OutputFormat) -> AppResult<()> {
    let mut ev = build_evaluator(cli)?;
    let point = operating_point(args, ev.fluids())?;
    ev.evaluate(&point)?;
    let Some(report) = ev.last_report() else {
        return Err(AppError::InvalidInput("no report after evaluation".to_string()));
    };
    let row = ReportRow::from(report);

    match format {
        OutputFormat::Csv => write_csv(&mut io::stdout(), &[row])?,
        OutputFormat::Json => write_json(&mut io::stdout(), &[row])?,
        OutputFormat::Text => {
            let h = report.headline;
            println!("Fluid: {}", report.fluid.display_name);
            println!("  WHRS_cycle_output = {:.4} kW", h.whrs_cycle_output);
            println!("  CO2_red           = {:.4} %", h.co2_red);
            println!("  EPC               = {:.6}", h.epc);
            println!();
            print!("{}", report.params);
            if !report.advisories.is_empty() {
                println!();
                println!("Advisories:");
                for adv in &report.advisories {
                    println!("  {adv}");
                }
            }
        }
    }
    Ok(())
}

fn cmd_fluids() -> AppResult<()> {
    let fluids = FluidRegistry::default();
    for (i, f) in fluids.iter().enumerate() {
        let mark = if i == fluids.default_index() { "*" } else { " " };
        println!("{mark} {i:2}  {:<22} {}", f.display_name, f.code);
    }
    Ok(())
}

fn cmd_sweep(
    cli: &Cli,
    args: &PointArgs,
    def: &SweepDefinition,
    format: OutputFormat,
) -> AppResult<()> {
    let mut ev = build_evaluator(cli)?;
    let base = operating_point(args, ev.fluids())?;
    let points = run_sweep(&mut ev, &base, def);

    match format {
        OutputFormat::Json => write_json(&mut io::stdout(), &points)?,
        OutputFormat::Csv | OutputFormat::Text => {
            if format == OutputFormat::Text {
                println!("{def}");
            }
            println!("{},WHRS_cycle_output,CO2_red,EPC,error", def.variable);
            for p in &points {
                match &p.outcome {
                    SweepOutcome::Evaluated(h) => println!(
                        "{},{},{},{},",
                        p.value, h.whrs_cycle_output, h.co2_red, h.epc
                    ),
                    SweepOutcome::Failed(msg) => println!("{},,,,{}", p.value, msg.replace(',', ";")),
                }
            }
        }
    }
    Ok(())
}

fn cmd_check_csv(
    cli: &Cli,
    path: &Path,
    drop: &[usize],
    tolerance: f64,
    orc_outlet: OutletMode,
) -> AppResult<()> {
    let mut ev = build_evaluator(cli)?;
    let check = CrossCheck {
        dropped: drop.to_vec(),
        tolerance,
        orc_outlet: orc_outlet.into(),
    };
    let results = check.check_file(&mut ev, path)?;

    let mut clean = 0;
    for result in &results {
        match result {
            RowCheck::Checked { row, mismatches } => {
                if mismatches.is_empty() {
                    clean += 1;
                }
                for m in mismatches {
                    println!(
                        "** row {row} {:2} CSV {}={:.4} Calculated {}={:.4} Dif={:.4}",
                        m.column,
                        m.csv_name,
                        m.csv,
                        m.name,
                        m.calculated,
                        m.diff()
                    );
                }
            }
            RowCheck::Failed { row, error } => println!("** row {row} failed: {error}"),
        }
    }
    println!("{clean}/{} rows match within {tolerance}", results.len());
    Ok(())
}

fn parse_variable(s: &str) -> Result<OperatingVariable, String> {
    OperatingVariable::from_name(s).ok_or_else(|| {
        let names: Vec<&str> = OperatingVariable::ALL.iter().map(|v| v.name()).collect();
        format!("unknown variable '{s}', expected one of {}", names.join(", "))
    })
}

fn parse_range(s: &str) -> Result<(OperatingVariable, f64, f64), String> {
    let (name, bounds) = s
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=MIN:MAX, got '{s}'"))?;
    let (min, max) = bounds
        .split_once(':')
        .ok_or_else(|| format!("expected MIN:MAX, got '{bounds}'"))?;
    let var = parse_variable(name.trim())?;
    let min = min.trim().parse::<f64>().map_err(|e| format!("min '{min}': {e}"))?;
    let max = max.trim().parse::<f64>().map_err(|e| format!("max '{max}': {e}"))?;
    Ok((var, min, max))
}
