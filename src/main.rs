//! renewable-assets entry point: CLI wiring around [`Resources`].

use std::process;

use renewable_assets::capacity::{panel_rated_capacity, turbine_rated_capacity};
use renewable_assets::catalog::CatalogQuery;
use renewable_assets::cli::{self, Command};
use renewable_assets::config::ResourceConfig;
use renewable_assets::error::AssetError;
use renewable_assets::io::export::export_curve_csv;
use renewable_assets::logging;
use renewable_assets::resources::Resources;
use renewable_assets::selector::TurbineSpec;

fn main() {
    logging::init();

    let opts = match cli::parse_args() {
        Ok(opts) => opts,
        Err(e) => {
            eprintln!("error: {e}");
            cli::print_usage();
            process::exit(2);
        }
    };

    let config = match &opts.config {
        Some(path) => ResourceConfig::from_toml_file(path).unwrap_or_else(|e| {
            eprintln!("error: {e}");
            process::exit(1);
        }),
        None => ResourceConfig::default(),
    };
    let errors = config.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        process::exit(1);
    }

    if let Err(e) = run(config, opts.command) {
        eprintln!("error: {e}");
        if let AssetError::Ambiguous { candidates, .. } = &e {
            for c in candidates {
                eprintln!("  {c}");
            }
        }
        process::exit(if e.is_recoverable() { 3 } else { 1 });
    }
}

fn run(config: ResourceConfig, command: Command) -> Result<(), AssetError> {
    let smoothing = config.smoothing;
    let mut resources = Resources::new(config)?;

    match command {
        Command::List => {
            println!("Wind turbines:");
            for name in resources.windturbines() {
                println!("  {name}");
            }
            println!("Solar panels:");
            for name in resources.solarpanels() {
                println!("  {name}");
            }
        }
        Command::Turbine {
            spec,
            smooth,
            curve_out,
        } => {
            let mut record = resources.resolve_turbine(&TurbineSpec::parse(&spec))?;
            if smooth {
                record = record.smoothed(&smoothing);
            }
            println!("Turbine:       {} {}", record.manufacturer, record.name);
            if let Some(source) = &record.source {
                println!("Source:        {source}");
            }
            println!("Hub height:    {:.1} m", record.hub_height);
            if !record.hub_heights.is_empty() {
                println!("Hub heights:   {:?}", record.hub_heights);
            }
            println!("Curve points:  {}", record.velocities.len());
            println!("Rated power:   {:.4} MW", turbine_rated_capacity(&record));
            if let Some(path) = curve_out {
                export_curve_csv(&record, &path).map_err(|e| AssetError::Io {
                    path: path.clone(),
                    source: e,
                })?;
                println!("Curve written: {}", path.display());
            }
        }
        Command::Download { query } => {
            let query = CatalogQuery::from_text(&query)?;
            let (record, path) = resources.resolve_and_persist(&query)?;
            println!("Stored {} {} at {}", record.manufacturer, record.name, path.display());
        }
        Command::Panel { name } => {
            let panel = resources.resolve_panel(&name)?;
            println!("Panel:         {}", if panel.name.is_empty() { &name } else { &panel.name });
            println!("Model:         {}", panel.model.name());
            println!("Rated capacity per m2: {:.4}", panel_rated_capacity(&panel));
        }
    }
    Ok(())
}
