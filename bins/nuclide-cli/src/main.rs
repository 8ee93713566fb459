//! nuclide-cli — decay calculators and tracked-reference management from
//! the terminal.
//!
//! Calculator commands are pure and print a single result block. Tracker
//! and isotope commands load a store, apply one mutation, and save it
//! back, so every invocation leaves the data directory consistent.

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chrono::{DateTime, TimeDelta, Utc};
use clap::{Args, Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use nuclide_core::types::{Isotope, Reference, Target};
use nuclide_core::units::{format_duration, ActivityUnit, TimeUnit};
use nuclide_decay::math;
use nuclide_decay::{alert_schedule, current_activity, next_target};
use nuclide_store::{IsotopeStore, ReferenceStore, StoreConfig};

#[derive(Parser)]
#[command(
    name = "nuclide-cli",
    about = "Radioactive decay calculators and live source tracking",
    version
)]
struct Cli {
    /// Data directory override (default: the platform data dir).
    #[arg(long, global = true, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert an activity value between units.
    Convert(ConvertArgs),
    /// Remaining activity after an elapsed time.
    Decay(DecayArgs),
    /// Initial activity needed to still have a target after a lead time.
    Required(RequiredArgs),
    /// Time until an activity decays down to a target.
    When(WhenArgs),
    /// Manage the isotope library.
    #[command(subcommand)]
    Isotope(IsotopeCommands),
    /// Manage tracked references.
    #[command(subcommand)]
    Tracker(TrackerCommands),
}

#[derive(Subcommand)]
enum IsotopeCommands {
    /// Print the isotope library.
    List,
    /// Add a custom isotope.
    Add(IsotopeAddArgs),
    /// Remove an isotope by symbol.
    Remove(IsotopeRemoveArgs),
}

#[derive(Subcommand)]
enum TrackerCommands {
    /// Start tracking a calibrated reference.
    Add(TrackerAddArgs),
    /// List tracked references with their current activity.
    List,
    /// Show one reference in full.
    Show(RefAtArgs),
    /// Toggle whether the reference is the pinned widget source.
    Pin(TrackerRefArgs),
    /// Toggle live activity tracking.
    Live(TrackerRefArgs),
    /// Re-express the calibration in another unit.
    SetUnit(SetUnitArgs),
    /// Stop tracking a reference.
    Remove(TrackerRefArgs),
    /// Manage decay targets on a reference.
    #[command(subcommand)]
    Target(TargetCommands),
    /// Resolve the nearest unreached target.
    Next(RefAtArgs),
    /// Print the notification schedule.
    Alerts(RefAtArgs),
}

#[derive(Subcommand)]
enum TargetCommands {
    /// Add a decay target to a reference.
    Add(TargetAddArgs),
    /// Remove a decay target from a reference.
    Remove(TargetRemoveArgs),
}

#[derive(Args)]
struct ConvertArgs {
    /// Activity value to convert.
    #[arg(long)]
    value: f64,
    /// Unit the value is in (mCi or MBq).
    #[arg(long)]
    from: String,
    /// Unit to convert into.
    #[arg(long)]
    to: String,
}

#[derive(Args)]
struct HalfLifeArgs {
    /// Isotope symbol from the library, e.g. Tc-99m.
    #[arg(long)]
    isotope: Option<String>,
    /// Explicit half-life value, an alternative to --isotope.
    #[arg(long)]
    half_life: Option<f64>,
    /// Time unit for --half-life (default: hours).
    #[arg(long, default_value = "hours")]
    half_life_unit: String,
}

#[derive(Args)]
struct DecayArgs {
    /// Activity at the start of the interval.
    #[arg(long)]
    activity: f64,
    /// Unit the activity is in (default: mCi).
    #[arg(long, default_value = "mCi")]
    unit: String,
    #[command(flatten)]
    half_life: HalfLifeArgs,
    /// Elapsed time to project across.
    #[arg(long)]
    elapsed: f64,
    /// Time unit for --elapsed (default: hours).
    #[arg(long, default_value = "hours")]
    elapsed_unit: String,
}

#[derive(Args)]
struct RequiredArgs {
    /// Activity the source must still have at the end of the lead time.
    #[arg(long)]
    target: f64,
    /// Unit the target is in (default: mCi).
    #[arg(long, default_value = "mCi")]
    unit: String,
    #[command(flatten)]
    half_life: HalfLifeArgs,
    /// Lead time between preparation and use.
    #[arg(long)]
    duration: f64,
    /// Time unit for --duration (default: hours).
    #[arg(long, default_value = "hours")]
    duration_unit: String,
}

#[derive(Args)]
struct WhenArgs {
    /// Current activity.
    #[arg(long)]
    activity: f64,
    /// Target activity, in the same unit as --activity.
    #[arg(long)]
    target: f64,
    /// Unit both values are in (default: mCi).
    #[arg(long, default_value = "mCi")]
    unit: String,
    #[command(flatten)]
    half_life: HalfLifeArgs,
}

#[derive(Args)]
struct IsotopeAddArgs {
    /// Full isotope name, e.g. "Yttrium-90".
    #[arg(long)]
    name: String,
    /// Short symbol, e.g. "Y-90".
    #[arg(long)]
    symbol: String,
    /// Half-life value.
    #[arg(long)]
    half_life: f64,
    /// Time unit for --half-life (default: hours).
    #[arg(long, default_value = "hours")]
    half_life_unit: String,
}

#[derive(Args)]
struct IsotopeRemoveArgs {
    /// Symbol of the isotope to remove.
    #[arg(long)]
    symbol: String,
}

#[derive(Args)]
struct TrackerAddArgs {
    /// Display name for the reference.
    #[arg(long)]
    name: String,
    /// Isotope symbol from the library, e.g. Tc-99m.
    #[arg(long)]
    isotope: String,
    /// Calibrated activity value.
    #[arg(long)]
    activity: f64,
    /// Unit of the calibrated activity (default: mCi).
    #[arg(long, default_value = "mCi")]
    unit: String,
    /// Calibration instant, RFC 3339 (default: now).
    #[arg(long)]
    calibrated_at: Option<String>,
}

#[derive(Args)]
struct TrackerRefArgs {
    /// Reference name.
    name: Option<String>,
    /// Reference id prefix, an alternative to the name.
    #[arg(long)]
    id: Option<String>,
}

#[derive(Args)]
struct RefAtArgs {
    #[command(flatten)]
    selector: TrackerRefArgs,
    /// Evaluation instant, RFC 3339 (default: now).
    #[arg(long)]
    at: Option<String>,
}

#[derive(Args)]
struct SetUnitArgs {
    #[command(flatten)]
    selector: TrackerRefArgs,
    /// New display unit (mCi or MBq).
    #[arg(long)]
    unit: String,
}

#[derive(Args)]
struct TargetAddArgs {
    #[command(flatten)]
    selector: TrackerRefArgs,
    /// Target label, e.g. "Release limit".
    #[arg(long)]
    label: String,
    /// Threshold activity.
    #[arg(long)]
    activity: f64,
    /// Unit of the threshold (default: the reference's unit).
    #[arg(long)]
    unit: Option<String>,
}

#[derive(Args)]
struct TargetRemoveArgs {
    #[command(flatten)]
    selector: TrackerRefArgs,
    /// Label of the target to remove.
    #[arg(long)]
    label: String,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = store_config(cli.data_dir);

    match cli.command {
        Commands::Convert(args) => convert(args),
        Commands::Decay(args) => decay(&config, args),
        Commands::Required(args) => required(&config, args),
        Commands::When(args) => when(&config, args),
        Commands::Isotope(command) => match command {
            IsotopeCommands::List => isotope_list(&config),
            IsotopeCommands::Add(args) => isotope_add(&config, args),
            IsotopeCommands::Remove(args) => isotope_remove(&config, args),
        },
        Commands::Tracker(command) => match command {
            TrackerCommands::Add(args) => tracker_add(&config, args),
            TrackerCommands::List => tracker_list(&config),
            TrackerCommands::Show(args) => tracker_show(&config, args),
            TrackerCommands::Pin(args) => tracker_pin(&config, args),
            TrackerCommands::Live(args) => tracker_live(&config, args),
            TrackerCommands::SetUnit(args) => tracker_set_unit(&config, args),
            TrackerCommands::Remove(args) => tracker_remove(&config, args),
            TrackerCommands::Target(command) => match command {
                TargetCommands::Add(args) => target_add(&config, args),
                TargetCommands::Remove(args) => target_remove(&config, args),
            },
            TrackerCommands::Next(args) => tracker_next(&config, args),
            TrackerCommands::Alerts(args) => tracker_alerts(&config, args),
        },
    }
}

/// Convert an activity value between units.
fn convert(args: ConvertArgs) -> Result<()> {
    let from: ActivityUnit = args.from.parse()?;
    let to: ActivityUnit = args.to.parse()?;
    let converted = math::convert(args.value, from, to);
    println!("{:.4} {} = {:.4} {}", args.value, from, converted, to);
    Ok(())
}

/// Project an activity forward across an elapsed time.
fn decay(config: &StoreConfig, args: DecayArgs) -> Result<()> {
    let unit: ActivityUnit = args.unit.parse()?;
    if !args.activity.is_finite() || args.activity < 0.0 {
        bail!("Activity must be non-negative, got {}", args.activity);
    }
    let half_life = resolve_half_life(config, &args.half_life)?;
    let elapsed = args.elapsed * args.elapsed_unit.parse::<TimeUnit>()?.seconds();
    if !elapsed.is_finite() || elapsed < 0.0 {
        bail!("Elapsed time must be non-negative");
    }
    let remaining = math::activity_at(args.activity, half_life, elapsed);

    println!("\n=== DECAY ===");
    println!("Initial:      {:.2} {}", args.activity, unit);
    println!("Half-life:    {}", format_duration(half_life));
    println!("Elapsed:      {}", format_duration(elapsed));
    println!("Decay factor: {:.4}", math::decay_factor(half_life, elapsed));
    println!("Remaining:    {remaining:.2} {unit}");
    Ok(())
}

/// Solve for the initial activity that decays to a target after a lead
/// time.
fn required(config: &StoreConfig, args: RequiredArgs) -> Result<()> {
    let unit: ActivityUnit = args.unit.parse()?;
    if !args.target.is_finite() || args.target <= 0.0 {
        bail!("Target activity must be positive, got {}", args.target);
    }
    let half_life = resolve_half_life(config, &args.half_life)?;
    let duration = args.duration * args.duration_unit.parse::<TimeUnit>()?.seconds();
    if !duration.is_finite() || duration < 0.0 {
        bail!("Lead time must be non-negative");
    }
    let initial = math::initial_activity_for(args.target, half_life, duration);

    println!("\n=== REQUIRED INITIAL ===");
    println!("Target:    {:.2} {}", args.target, unit);
    println!("Half-life: {}", format_duration(half_life));
    println!("Lead time: {}", format_duration(duration));
    println!("Required:  {initial:.2} {unit}");
    Ok(())
}

/// Solve for the time until an activity decays down to a target.
fn when(config: &StoreConfig, args: WhenArgs) -> Result<()> {
    let unit: ActivityUnit = args.unit.parse()?;
    if !args.activity.is_finite() || args.activity <= 0.0 {
        bail!("Activity must be positive, got {}", args.activity);
    }
    if !args.target.is_finite() || args.target <= 0.0 {
        bail!("Target activity must be positive, got {}", args.target);
    }
    let half_life = resolve_half_life(config, &args.half_life)?;
    let seconds = math::time_to_reach(args.activity, args.target, half_life);

    println!("\n=== TIME TO TARGET ===");
    println!("Current:   {:.2} {}", args.activity, unit);
    println!("Target:    {:.2} {}", args.target, unit);
    println!("Half-life: {}", format_duration(half_life));
    if seconds <= 0.0 {
        println!("Already at or below the target.");
        return Ok(());
    }
    println!("Time:      {}", format_duration(seconds));
    let millis = (seconds * 1000.0).round() as i64;
    match Utc::now().checked_add_signed(TimeDelta::milliseconds(millis)) {
        Some(reached) => println!("Reached:   {}", format_instant(reached)),
        None => println!("Reached:   beyond the representable date range"),
    }
    Ok(())
}

/// Print the isotope library.
fn isotope_list(config: &StoreConfig) -> Result<()> {
    let store = load_isotopes(config)?;
    println!("\n=== ISOTOPE LIBRARY ===");
    for isotope in store.isotopes() {
        println!(
            "{:<8} {:<20} half-life {}",
            isotope.symbol,
            isotope.name,
            isotope.half_life_display()
        );
    }
    println!("\n{} isotope(s)", store.len());
    Ok(())
}

/// Add a custom isotope to the library.
fn isotope_add(config: &StoreConfig, args: IsotopeAddArgs) -> Result<()> {
    let unit: TimeUnit = args.half_life_unit.parse()?;
    let mut store = load_isotopes(config)?;
    if store.find_symbol(&args.symbol).is_some() {
        bail!("Isotope {} is already in the library", args.symbol);
    }
    let isotope = Isotope::new(args.name, args.symbol, args.half_life * unit.seconds())?;
    store.add(isotope.clone());
    save_isotopes(config, &store)?;

    println!("\n=== ISOTOPE ADDED ===");
    println!("Name:      {}", isotope.name);
    println!("Symbol:    {}", isotope.symbol);
    println!("Half-life: {}", isotope.half_life_display());
    Ok(())
}

/// Remove an isotope from the library. References keep their snapshot.
fn isotope_remove(config: &StoreConfig, args: IsotopeRemoveArgs) -> Result<()> {
    let mut store = load_isotopes(config)?;
    let isotope = store
        .find_symbol(&args.symbol)
        .with_context(|| format!("No isotope with symbol {}", args.symbol))?
        .clone();
    store.remove(isotope.id);
    save_isotopes(config, &store)?;
    println!("Removed {isotope} from the library.");
    Ok(())
}

/// Start tracking a calibrated reference.
fn tracker_add(config: &StoreConfig, args: TrackerAddArgs) -> Result<()> {
    let unit: ActivityUnit = args.unit.parse()?;
    let calibrated_at = parse_instant(args.calibrated_at.as_deref())?;
    let isotopes = load_isotopes(config)?;
    let isotope = isotopes
        .find_symbol(&args.isotope)
        .with_context(|| format!("No isotope with symbol {}", args.isotope))?
        .clone();
    let reference = Reference::new(args.name, isotope, args.activity, unit, calibrated_at)?;

    let mut store = load_references(config)?;
    store.add(reference.clone());
    save_references(config, &store)?;

    println!("\n=== REFERENCE ADDED ===");
    println!("Name:       {}", reference.name);
    println!("Isotope:    {}", reference.isotope);
    println!(
        "Calibrated: {:.2} {} at {}",
        reference.calibration_activity,
        reference.unit,
        format_instant(reference.calibration_date)
    );
    println!("Id:         {}", reference.id);
    Ok(())
}

/// List tracked references with their current activity.
fn tracker_list(config: &StoreConfig) -> Result<()> {
    let store = load_references(config)?;
    if store.is_empty() {
        println!("No tracked references.");
        return Ok(());
    }
    let now = Utc::now();
    println!("\n=== TRACKED REFERENCES ===");
    for reference in store.references() {
        let mut flags = String::new();
        if reference.pinned {
            flags.push_str(" [pinned]");
        }
        if reference.live {
            flags.push_str(" [live]");
        }
        println!(
            "{:<20} {:<8} {:>10.2} {}{}",
            reference.name,
            reference.isotope.symbol,
            current_activity(reference, now),
            reference.unit,
            flags
        );
    }
    println!("\n{} reference(s)", store.len());
    Ok(())
}

/// Show one reference in full, with per-target status.
fn tracker_show(config: &StoreConfig, args: RefAtArgs) -> Result<()> {
    let store = load_references(config)?;
    let reference = find_reference(&store, &args.selector)?;
    let at = parse_instant(args.at.as_deref())?;
    let current = current_activity(&reference, at);

    println!("\n=== REFERENCE ===");
    println!("Name:       {}", reference.name);
    println!("Id:         {}", reference.id);
    println!(
        "Isotope:    {}, half-life {}",
        reference.isotope,
        reference.isotope.half_life_display()
    );
    println!(
        "Calibrated: {:.2} {} at {}",
        reference.calibration_activity,
        reference.unit,
        format_instant(reference.calibration_date)
    );
    println!("Current:    {:.2} {} at {}", current, reference.unit, format_instant(at));
    println!("Pinned:     {}", if reference.pinned { "yes" } else { "no" });
    println!("Live:       {}", if reference.live { "yes" } else { "no" });

    if reference.targets.is_empty() {
        println!("Targets:    none");
        return Ok(());
    }
    println!("Targets:");
    for target in &reference.targets {
        let threshold = math::convert(target.target_activity, target.unit, reference.unit);
        if current <= threshold {
            println!(
                "  {:<16} {:>10.2} {}  reached",
                target.name, target.target_activity, target.unit
            );
        } else {
            let seconds =
                math::time_to_reach(current, threshold, reference.isotope.half_life_seconds);
            println!(
                "  {:<16} {:>10.2} {}  in {}",
                target.name,
                target.target_activity,
                target.unit,
                format_duration(seconds)
            );
        }
    }
    Ok(())
}

/// Toggle whether the reference is the pinned widget source.
fn tracker_pin(config: &StoreConfig, args: TrackerRefArgs) -> Result<()> {
    let mut store = load_references(config)?;
    let mut reference = find_reference(&store, &args)?;
    reference.pinned = !reference.pinned;
    let line = format!(
        "{} {}.",
        if reference.pinned { "Pinned" } else { "Unpinned" },
        reference.name
    );
    store.update(reference);
    save_references(config, &store)?;
    println!("{line}");
    Ok(())
}

/// Toggle live activity tracking.
fn tracker_live(config: &StoreConfig, args: TrackerRefArgs) -> Result<()> {
    let mut store = load_references(config)?;
    let mut reference = find_reference(&store, &args)?;
    reference.live = !reference.live;
    let line = format!(
        "Live activity {} for {}.",
        if reference.live { "on" } else { "off" },
        reference.name
    );
    store.update(reference);
    save_references(config, &store)?;
    println!("{line}");
    Ok(())
}

/// Re-express a reference's calibration in another unit.
fn tracker_set_unit(config: &StoreConfig, args: SetUnitArgs) -> Result<()> {
    let unit: ActivityUnit = args.unit.parse()?;
    let mut store = load_references(config)?;
    let mut reference = find_reference(&store, &args.selector)?;
    reference.set_unit(unit);
    let line = format!(
        "{} is now calibrated at {:.2} {}.",
        reference.name, reference.calibration_activity, reference.unit
    );
    store.update(reference);
    save_references(config, &store)?;
    println!("{line}");
    Ok(())
}

/// Stop tracking a reference.
fn tracker_remove(config: &StoreConfig, args: TrackerRefArgs) -> Result<()> {
    let mut store = load_references(config)?;
    let reference = find_reference(&store, &args)?;
    store.remove(reference.id);
    save_references(config, &store)?;
    println!("Removed {}.", reference.name);
    Ok(())
}

/// Add a decay target to a reference.
fn target_add(config: &StoreConfig, args: TargetAddArgs) -> Result<()> {
    let mut store = load_references(config)?;
    let mut reference = find_reference(&store, &args.selector)?;
    let unit = match &args.unit {
        Some(s) => s.parse::<ActivityUnit>()?,
        None => reference.unit,
    };
    let target = Target::new(args.label, args.activity, unit)?;
    let line = format!(
        "Added target {} ({:.2} {}) to {}.",
        target.name, target.target_activity, target.unit, reference.name
    );
    reference.add_target(target);
    store.update(reference);
    save_references(config, &store)?;
    println!("{line}");
    Ok(())
}

/// Remove a decay target from a reference.
fn target_remove(config: &StoreConfig, args: TargetRemoveArgs) -> Result<()> {
    let mut store = load_references(config)?;
    let mut reference = find_reference(&store, &args.selector)?;
    let removed = reference
        .targets
        .iter()
        .find(|t| t.name == args.label)
        .with_context(|| format!("{} has no target named {}", reference.name, args.label))?
        .clone();
    reference.remove_target(removed.id);
    let line = format!("Removed target {} from {}.", removed.name, reference.name);
    store.update(reference);
    save_references(config, &store)?;
    println!("{line}");
    Ok(())
}

/// Resolve the nearest unreached target.
fn tracker_next(config: &StoreConfig, args: RefAtArgs) -> Result<()> {
    let store = load_references(config)?;
    let reference = find_reference(&store, &args.selector)?;
    let at = parse_instant(args.at.as_deref())?;
    match next_target(&reference, at) {
        Some(next) => {
            let wait = (next.reached_at - at).num_milliseconds() as f64 / 1000.0;
            println!("\n=== NEXT TARGET ===");
            println!("Target:   {}", next.name);
            println!("Activity: {:.2} {}", next.activity, reference.unit);
            println!("In:       {}", format_duration(wait));
            println!("At:       {}", format_instant(next.reached_at));
        }
        None => println!("No unreached target for {}.", reference.name),
    }
    Ok(())
}

/// Print the notification schedule.
fn tracker_alerts(config: &StoreConfig, args: RefAtArgs) -> Result<()> {
    let store = load_references(config)?;
    let reference = find_reference(&store, &args.selector)?;
    let at = parse_instant(args.at.as_deref())?;
    let alerts = alert_schedule(&reference, at);
    if alerts.is_empty() {
        println!("No alerts scheduled for {}.", reference.name);
        return Ok(());
    }
    println!("\n=== ALERT SCHEDULE ===");
    for alert in &alerts {
        println!("{}  {}", format_instant(alert.fire_at), alert.title());
        println!("  {}", alert.body());
    }
    println!("\n{} alert(s)", alerts.len());
    Ok(())
}

/// Store configuration from the global flag or the platform default.
fn store_config(data_dir: Option<PathBuf>) -> StoreConfig {
    let config = match data_dir {
        Some(dir) => StoreConfig::with_data_dir(dir),
        None => StoreConfig::default(),
    };
    debug!("using data dir {}", config.data_dir.display());
    config
}

/// Half-life in seconds from either a library isotope or an explicit
/// value with its time unit.
fn resolve_half_life(config: &StoreConfig, args: &HalfLifeArgs) -> Result<f64> {
    match (&args.isotope, args.half_life) {
        (Some(_), Some(_)) => bail!("Use either --isotope or --half-life, not both"),
        (Some(symbol), None) => {
            let store = load_isotopes(config)?;
            let isotope = store
                .find_symbol(symbol)
                .with_context(|| format!("No isotope with symbol {symbol}"))?;
            Ok(isotope.half_life_seconds)
        }
        (None, Some(value)) => {
            let unit: TimeUnit = args.half_life_unit.parse()?;
            let seconds = value * unit.seconds();
            if !seconds.is_finite() || seconds <= 0.0 {
                bail!("Half-life must be positive, got {value}");
            }
            Ok(seconds)
        }
        (None, None) => bail!("Provide an --isotope symbol or a --half-life value"),
    }
}

/// Look up one tracked reference by exact name or id prefix.
fn find_reference(store: &ReferenceStore, selector: &TrackerRefArgs) -> Result<Reference> {
    if let Some(prefix) = &selector.id {
        let prefix = prefix.to_lowercase();
        let matches: Vec<&Reference> = store
            .references()
            .iter()
            .filter(|r| r.id.to_string().starts_with(&prefix))
            .collect();
        return match matches.as_slice() {
            [] => bail!("No reference with id prefix {prefix}"),
            [only] => Ok((*only).clone()),
            _ => bail!("Id prefix {prefix} is ambiguous"),
        };
    }
    let Some(name) = &selector.name else {
        bail!("Provide a reference name or --id");
    };
    let matches: Vec<&Reference> = store
        .references()
        .iter()
        .filter(|r| r.name == *name)
        .collect();
    match matches.as_slice() {
        [] => bail!("No reference named {name}"),
        [only] => Ok((*only).clone()),
        _ => bail!("Several references are named {name}; select one with --id"),
    }
}

/// Load the isotope library, seeding the defaults on first run.
fn load_isotopes(config: &StoreConfig) -> Result<IsotopeStore> {
    IsotopeStore::load_or_default(&config.isotopes_path())
        .context("Failed to load the isotope library")
}

/// Persist the isotope library, creating the data directory if needed.
fn save_isotopes(config: &StoreConfig, store: &IsotopeStore) -> Result<()> {
    fs::create_dir_all(&config.data_dir)
        .with_context(|| format!("Failed to create {}", config.data_dir.display()))?;
    store
        .save_to_file(&config.isotopes_path())
        .context("Failed to save the isotope library")
}

/// Load the tracked references, starting empty on first run.
fn load_references(config: &StoreConfig) -> Result<ReferenceStore> {
    ReferenceStore::load_or_empty(&config.references_path())
        .context("Failed to load the tracked references")
}

/// Persist the tracked references, creating the data directory if needed.
fn save_references(config: &StoreConfig, store: &ReferenceStore) -> Result<()> {
    fs::create_dir_all(&config.data_dir)
        .with_context(|| format!("Failed to create {}", config.data_dir.display()))?;
    store
        .save_to_file(&config.references_path())
        .context("Failed to save the tracked references")
}

/// Parse an optional RFC 3339 instant, defaulting to now.
fn parse_instant(at: Option<&str>) -> Result<DateTime<Utc>> {
    match at {
        Some(s) => s
            .parse::<DateTime<Utc>>()
            .with_context(|| format!("Invalid instant (want RFC 3339): {s}")),
        None => Ok(Utc::now()),
    }
}

/// Render an instant for terminal output.
fn format_instant(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}
