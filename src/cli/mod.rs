//! Command line front-end.
//!
//! Each subcommand collects its data (user values, a data file or a built-in
//! example), calls one kernel and renders the result as text. Rendering goes
//! through any [`Write`] so the output can be captured.

use std::io::Write;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::error::{NumkitError, Result};
use crate::expr::ExpressionEvaluator;
use crate::fit::{fit_all, FitKind};
use crate::input::{parse_matrix, parse_values, read_series_file};
use crate::linalg::{
    GaussSeidel, GaussSeidelConfig, GaussSeidelRun, LinearSystem, ProductionPlan,
    DEFAULT_MAX_ITERATIONS, DEFAULT_TOLERANCE,
};
use crate::presets::{self, WheatstoneBridge};
use crate::quadrature::{self, integrate_function};
use crate::series::SampleSeries;
use crate::session::Session;

/// Classical numerical methods toolkit
#[derive(Parser, Debug)]
#[command(name = "numkit", author, version, about, long_about = None)]
pub struct Cli {
    /// Enable debug logging (otherwise controlled by NUMKIT_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available methods.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Solve Ax = b directly with LU decomposition
    Solve(SolveArgs),
    /// Solve Ax = b with Gauss-Seidel iteration
    GaussSeidel(GaussSeidelArgs),
    /// Least-squares fit of linear, quadratic and exponential models
    Fit(FitArgs),
    /// Composite trapezoid and Simpson's 1/3 integration
    Integrate(IntegrateArgs),
}

#[derive(Args, Debug)]
pub struct SolveArgs {
    /// Matrix rows separated by ';' (default: component production example)
    #[arg(short, long, requires = "rhs", allow_hyphen_values = true)]
    pub matrix: Option<String>,

    /// Right-hand side values
    #[arg(short, long, requires = "matrix", allow_hyphen_values = true)]
    pub rhs: Option<String>,

    /// Round the solution to whole units and report the total
    #[arg(short, long)]
    pub production: bool,
}

#[derive(Args, Debug)]
pub struct GaussSeidelArgs {
    /// Matrix rows separated by ';' (default: Wheatstone bridge)
    #[arg(short, long, requires = "rhs", allow_hyphen_values = true)]
    pub matrix: Option<String>,

    /// Right-hand side values
    #[arg(short, long, requires = "matrix", allow_hyphen_values = true)]
    pub rhs: Option<String>,

    /// Initial guess (default: zeros)
    #[arg(short, long, allow_hyphen_values = true)]
    pub initial: Option<String>,

    /// Bridge source voltage E in volts
    #[arg(long, default_value_t = 30.0)]
    pub voltage: f64,

    /// Bridge resistance R1 in ohms
    #[arg(long, default_value_t = 20.0)]
    pub r1: f64,

    /// Bridge resistance R2 in ohms
    #[arg(long, default_value_t = 120.0)]
    pub r2: f64,

    /// Bridge resistance R3 in ohms
    #[arg(long, default_value_t = 120.0)]
    pub r3: f64,

    /// Bridge resistance R4 in ohms
    #[arg(long, default_value_t = 120.0)]
    pub r4: f64,

    /// Bridge resistance R5 in ohms
    #[arg(long, default_value_t = 120.0)]
    pub r5: f64,

    /// Maximum number of sweeps
    #[arg(long, default_value_t = DEFAULT_MAX_ITERATIONS)]
    pub max_iterations: usize,

    /// Stop when the largest update is below this value
    #[arg(long, default_value_t = DEFAULT_TOLERANCE)]
    pub tolerance: f64,

    /// Print every iterate
    #[arg(long)]
    pub history: bool,
}

#[derive(Args, Debug)]
pub struct FitArgs {
    /// Independent variable values
    #[arg(short, long, requires = "y", conflicts_with = "file", allow_hyphen_values = true)]
    pub x: Option<String>,

    /// Observed values
    #[arg(short, long, requires = "x", allow_hyphen_values = true)]
    pub y: Option<String>,

    /// Two-column data file (x y per line)
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Model to fit: linear, quadratic or exponential (repeatable; default: all)
    #[arg(short, long = "kind")]
    pub kinds: Vec<FitKind>,
}

#[derive(Args, Debug)]
pub struct IntegrateArgs {
    /// Equally spaced sample points
    #[arg(short, long, requires = "y", conflicts_with_all = ["file", "function"], allow_hyphen_values = true)]
    pub x: Option<String>,

    /// Function values at the sample points
    #[arg(short, long, requires = "x", allow_hyphen_values = true)]
    pub y: Option<String>,

    /// Two-column data file (x y per line)
    #[arg(long, conflicts_with = "function")]
    pub file: Option<PathBuf>,

    /// Function of x to integrate, e.g. "x**2" or "exp(-x)"
    #[arg(long)]
    pub function: Option<String>,

    /// Lower limit a
    #[arg(long, requires = "function", allow_negative_numbers = true)]
    pub from: Option<f64>,

    /// Upper limit b
    #[arg(long, requires = "function", allow_negative_numbers = true)]
    pub to: Option<f64>,

    /// Number of subintervals n (even for Simpson's rule)
    #[arg(short = 'n', long, requires = "function")]
    pub subintervals: Option<usize>,
}

/// Run one parsed command, writing the report to `out`.
pub fn run(command: &Command, out: &mut impl Write) -> Result<()> {
    match command {
        Command::Solve(args) => run_solve(args, out),
        Command::GaussSeidel(args) => run_gauss_seidel(args, out),
        Command::Fit(args) => run_fit(args, out),
        Command::Integrate(args) => run_integrate(args, out),
    }
}

fn run_solve(args: &SolveArgs, out: &mut impl Write) -> Result<()> {
    let (system, production) = match (&args.matrix, &args.rhs) {
        (Some(m), Some(r)) => (
            LinearSystem::new(parse_matrix(m)?, parse_values(r)?)?,
            args.production,
        ),
        _ => {
            writeln!(out, "Example: component production (metal, plastic, rubber in grams)")?;
            (presets::production_system()?, true)
        }
    };

    writeln!(out, "Coefficient matrix A:")?;
    write!(out, "{}", system.a)?;
    writeln!(out, "Right-hand side b: {}", format_vector(&system.b))?;

    let x = system.solve()?;
    writeln!(out, "\nSolution x: {}", format_vector(&x))?;

    if production {
        let plan = ProductionPlan::from_solution(&x);
        writeln!(out, "Rounded solution: {:?}", plan.quantities)?;
        writeln!(out, "\n{}", plan)?;
    }
    Ok(())
}

fn run_gauss_seidel(args: &GaussSeidelArgs, out: &mut impl Write) -> Result<()> {
    let config = GaussSeidelConfig::new()
        .with_max_iterations(args.max_iterations)
        .with_tolerance(args.tolerance);

    if let (Some(m), Some(r)) = (&args.matrix, &args.rhs) {
        let system = LinearSystem::new(parse_matrix(m)?, parse_values(r)?)?;
        let x0 = match &args.initial {
            Some(text) => parse_values(text)?,
            None => vec![0.0; system.size()],
        };
        let run = GaussSeidel::with_config(config).solve(&system.a, &system.b, &x0)?;
        return write_run(out, &run, &config, args.history);
    }

    let bridge = WheatstoneBridge::new(args.voltage, [args.r1, args.r2, args.r3, args.r4, args.r5])?;
    let mut session = Session::new();
    let result = session.solve_bridge(bridge, config)?;

    writeln!(
        out,
        "Wheatstone bridge: E = {} V, R1..R5 = {:?} ohm",
        bridge.source_voltage, bridge.resistances
    )?;
    write_run(out, &result.run, &config, args.history)?;

    let c = &result.currents;
    writeln!(out, "\nBranch currents:")?;
    for (name, value) in [
        ("I1 (R1)", c.r1),
        ("I2 (R2)", c.r2),
        ("I3 (R3)", c.r3),
        ("I4 (R4)", c.r4),
        ("I5 (R5)", c.r5),
        ("Total", c.total),
    ] {
        writeln!(out, "  {:<8} {:>12.6} A", name, value)?;
    }
    Ok(())
}

fn write_run(
    out: &mut impl Write,
    run: &GaussSeidelRun,
    config: &GaussSeidelConfig,
    history: bool,
) -> Result<()> {
    if history {
        writeln!(out, "Iterations:")?;
        for (k, x) in run.history.iter().enumerate() {
            writeln!(out, "  {:>4}  {}", k, format_vector(x))?;
        }
    }

    if run.converged() {
        writeln!(
            out,
            "Converged at iteration {} (tolerance {:e})",
            run.iterations, config.tolerance
        )?;
    } else {
        writeln!(
            out,
            "Max iterations reached ({}) without meeting tolerance {:e}; last change {:.3e}",
            run.iterations, config.tolerance, run.last_change
        )?;
    }
    writeln!(out, "Solution x: {}", format_vector(&run.solution))?;
    Ok(())
}

fn run_fit(args: &FitArgs, out: &mut impl Write) -> Result<()> {
    let series = match load_series(&args.x, &args.y, &args.file)? {
        Some(series) => series,
        None => {
            writeln!(out, "Example: decaying observations")?;
            presets::regression_sample()?
        }
    };
    write_series(out, &series)?;

    let kinds: Vec<FitKind> = if args.kinds.is_empty() {
        FitKind::ALL.to_vec()
    } else {
        args.kinds.clone()
    };
    let batch = fit_all(&kinds, series.x(), series.y());

    for kind in FitKind::ALL.iter().filter(|k| kinds.contains(*k)) {
        writeln!(out, "\n--- {} fit ---", kind)?;
        if let Some(result) = batch.get(*kind) {
            let label = match kind {
                FitKind::Linear => "[a0, a1]",
                FitKind::Quadratic => "[a0, a1, a2]",
                FitKind::Exponential => "[ln(a), b]",
            };
            writeln!(out, "Coefficients {}: {}", label, format_vector(&result.coefficients))?;
            writeln!(out, "Equation: {}", result)?;
            writeln!(out, "Squared error: {:.6}", result.error)?;
        } else if let Some((_, e)) = batch.failures.iter().find(|(k, _)| k == kind) {
            writeln!(out, "Skipped: {}", e)?;
        }
    }

    writeln!(out, "\n{:<12} {:<45} {:<20}", "Model", "Equation G(x)", "Squared error")?;
    writeln!(out, "{}", "-".repeat(77))?;
    for result in &batch.fits {
        writeln!(
            out,
            "{:<12} {:<45} {:<20.6}",
            result.kind.name(),
            result.equation(),
            result.error
        )?;
    }
    writeln!(out, "{}", "-".repeat(77))?;

    match batch.best() {
        Some(best) => writeln!(out, "Best fit (smallest squared error): {}", best.kind)?,
        None => writeln!(out, "No model could be fitted.")?,
    }
    Ok(())
}

fn run_integrate(args: &IntegrateArgs, out: &mut impl Write) -> Result<()> {
    if let Some(function) = &args.function {
        let (a, b, n) = match (args.from, args.to, args.subintervals) {
            (Some(a), Some(b), Some(n)) => (a, b, n),
            _ => {
                return Err(NumkitError::invalid_parameter(
                    "--function needs --from, --to and --subintervals",
                ));
            }
        };
        let result = integrate_function(&ExpressionEvaluator, function, a, b, n)?;
        writeln!(out, "Integral of f(x) = {} from {} to {} (n = {})", function, a, b, n)?;
        write_series(out, &result.series)?;
        writeln!(out, "\n{}", result.report)?;
        return Ok(());
    }

    let series = match load_series(&args.x, &args.y, &args.file)? {
        Some(series) => series,
        None => {
            writeln!(out, "Example: river cross-section area (m^2)")?;
            presets::river_cross_section()?
        }
    };
    write_series(out, &series)?;

    let report = quadrature::integrate(&series);
    writeln!(out, "Number of points (N): {}", report.points)?;
    if let Some(h) = report.step {
        writeln!(out, "Step (h): {:.6}", h)?;
    }
    writeln!(out, "\n{}", report)?;
    Ok(())
}

fn load_series(
    x: &Option<String>,
    y: &Option<String>,
    file: &Option<PathBuf>,
) -> Result<Option<SampleSeries>> {
    match (x, y, file) {
        (Some(x), Some(y), _) => Ok(Some(SampleSeries::new(parse_values(x)?, parse_values(y)?)?)),
        (_, _, Some(path)) => read_series_file(path).map(Some),
        _ => Ok(None),
    }
}

fn write_series(out: &mut impl Write, series: &SampleSeries) -> Result<()> {
    writeln!(out, "X: {}", format_vector(series.x()))?;
    writeln!(out, "Y: {}", format_vector(series.y()))?;
    Ok(())
}

fn format_vector(values: &[f64]) -> String {
    let items: Vec<String> = values.iter().map(|v| format!("{:.6}", v)).collect();
    format!("[{}]", items.join(", "))
}
