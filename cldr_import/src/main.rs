//! CLI entry point: one `import` subcommand that walks a CLDR checkout
//! and writes one JSON blob per locale plus one global blob, matching
//! `intl_localedata`'s `FsLocaleDataSource` file-naming convention.

mod dayperiods;
mod error;
mod global;
mod locale;
mod plurals;
mod rbnf;
mod version;
mod xml;

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use log::{info, warn};

use error::ImportError;
use locale::LocaleInputs;

#[derive(Parser)]
#[command(name = "cldr_import")]
#[command(version)]
#[command(about = "Compiles a CLDR common/ checkout into this workspace's locale data blobs.")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Read `<cldr_dir>/common/...` and write one JSON blob per locale
    /// (plus `_global.json`) into `<out_dir>`.
    Import {
        /// Root of a CLDR checkout or release archive (contains `common/`).
        cldr_dir: PathBuf,
        /// Directory to write compiled blobs into.
        #[arg(short, long, default_value = "locale-data")]
        out_dir: PathBuf,
        /// Re-emit every blob even if its CLDR revision hasn't advanced.
        #[arg(short, long)]
        force: bool,
    },
}

fn main() {
    env_logger::init();
    let args = Args::parse();
    let result = match args.command {
        Command::Import { cldr_dir, out_dir, force } => run_import(&cldr_dir, &out_dir, force),
    };
    if let Err(err) = result {
        eprintln!("cldr_import: {err}");
        std::process::exit(1);
    }
}

fn run_import(cldr_dir: &Path, out_dir: &Path, force: bool) -> Result<(), ImportError> {
    let common = cldr_dir.join("common");
    let main_dir = common.join("main");
    let supplemental_dir = common.join("supplemental");
    let bcp47_dir = common.join("bcp47");
    let rbnf_dir = common.join("rbnf");

    std::fs::create_dir_all(out_dir).map_err(|e| ImportError::Io(out_dir.display().to_string(), e))?;

    info!("parsing supplemental data from {}", supplemental_dir.display());
    let global = global::parse_global(&supplemental_dir, &bcp47_dir)?;
    let numbering_systems = global::parse_numbering_systems(&supplemental_dir)?;

    let cardinal_rules = plurals::parse_plural_rules(&supplemental_dir.join("plurals.xml"))?;
    let ordinal_rules = plurals::parse_plural_rules(&supplemental_dir.join("ordinals.xml"))?;
    let day_period_rules = dayperiods::parse_day_period_rules(&supplemental_dir.join("dayPeriods.xml"))?;
    let rbnf_by_locale = rbnf::parse_rbnf_dir(&rbnf_dir)?;

    write_blob_if_stale(&out_dir.join("_global.json"), &global.data, global.version, force)?;

    let mut locale_files: Vec<PathBuf> = std::fs::read_dir(&main_dir)
        .map_err(|e| ImportError::Io(main_dir.display().to_string(), e))?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.extension() == Some(OsStr::new("xml")))
        .collect();
    // Root first, then shortest filenames first. Parent resolution itself
    // happens lazily at lookup time (`LocaleDataStore`), so this ordering
    // only affects which file surfaces an XML error earliest.
    locale_files.sort_by_key(|p| {
        let stem = p.file_stem().and_then(|s| s.to_str()).unwrap_or_default().to_string();
        (stem != "root", stem.len(), stem)
    });

    let mut written = 0usize;
    let mut skipped = 0usize;
    for path in &locale_files {
        let locale_id = path.file_stem().and_then(|s| s.to_str()).unwrap_or_default().to_string();
        let inputs = LocaleInputs {
            plural_rules: cardinal_rules.get(&locale_id),
            ordinal_rules: ordinal_rules.get(&locale_id),
            rbnf_rules: rbnf_by_locale.get(&locale_id),
            day_period_rules: day_period_rules.get(&locale_id),
            numbering_systems: &numbering_systems,
        };
        match locale::parse_locale_file(path, &inputs) {
            Ok(parsed) => {
                let out_path = out_dir.join(format!("{}.json", parsed.locale_id));
                if write_blob_if_stale(&out_path, &parsed.data, parsed.version, force)? {
                    written += 1;
                } else {
                    skipped += 1;
                }
            }
            Err(err) => {
                warn!("skipping {}: {err}", path.display());
            }
        }
    }

    info!("wrote {written} locale blob(s), skipped {skipped} up-to-date blob(s)");
    Ok(())
}

/// Writes `data` to `path` unless a previous blob there is already at
/// least as new as `version` and `force` wasn't given (spec §6). Returns
/// whether the blob was (re)written.
fn write_blob_if_stale(path: &Path, data: &serde_json::Value, version: i64, force: bool) -> Result<bool, ImportError> {
    if !force {
        if let Some(previous) = read_existing_version(path) {
            if !version::is_stale(Some(previous), Some(version)) {
                return Ok(false);
            }
        }
    }
    let mut data = data.clone();
    if let Some(map) = data.as_object_mut() {
        map.insert("_version".to_string(), serde_json::json!(version));
    }
    let text = serde_json::to_string_pretty(&data).map_err(|e| ImportError::Json(path.display().to_string(), e))?;
    std::fs::write(path, text).map_err(|e| ImportError::Io(path.display().to_string(), e))?;
    Ok(true)
}

fn read_existing_version(path: &Path) -> Option<i64> {
    let text = std::fs::read_to_string(path).ok()?;
    let value: serde_json::Value = serde_json::from_str(&text).ok()?;
    value.get("_version")?.as_i64()
}
