use anyhow::{Context, Result};
use clap::Parser;
use std::io::Write;
use std::path::PathBuf;

mod app;
mod keybindings;
mod theme;
mod ui;

use app::App;
use instacats::config::Config;
use instacats::presenter::{BundledRecords, ListPresenter, SystemOpener};
use instacats::records::{LoadError, Record};
use instacats::resources::ResourceBundle;

/// Resource bundle shipped with the crate.
const BUNDLED_RESOURCES: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/resources");

/// Get the config directory path (~/.config/instacats/)
fn get_config_dir() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME environment variable not set")?;
    Ok(PathBuf::from(home).join(".config").join("instacats"))
}

#[derive(Parser, Debug)]
#[command(name = "instacats", about = "Browse a bundled list of cats and open their pages")]
struct Args {
    /// Config file (default: ~/.config/instacats/config.toml)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Resource bundle directory
    #[arg(long, value_name = "DIR")]
    resources: Option<PathBuf>,

    /// Data file inside the resource bundle
    #[arg(long, value_name = "NAME")]
    file: Option<String>,

    /// Print the loaded cats and exit
    #[arg(long)]
    list: bool,

    /// With --list, print JSON instead of tab-separated lines
    #[arg(long, requires = "list")]
    json: bool,
}

/// Write records for `--list`.
fn print_records(out: &mut impl Write, records: &[Record], json: bool) -> Result<()> {
    if json {
        serde_json::to_writer_pretty(&mut *out, records).context("Failed to encode cats")?;
        writeln!(out)?;
    } else {
        for record in records {
            writeln!(out, "{}\t{}\t{}", record.id, record.name, record.external_link)?;
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config_path = match &args.config {
        Some(path) => path.clone(),
        None => get_config_dir()?.join("config.toml"),
    };
    let mut config = Config::load(&config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;

    // CLI flags win over the config file
    if let Some(dir) = args.resources {
        config.resource_dir = Some(dir);
    }
    if let Some(file) = args.file {
        config.data_file = file;
    }

    let root = config
        .resource_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from(BUNDLED_RESOURCES));
    let bundle = ResourceBundle::new(root);
    let source = BundledRecords::new(&bundle, config.data_file.as_str(), config.records_key.as_str());

    let mut presenter = ListPresenter::new(SystemOpener);
    presenter.load(&source);

    if let Some(LoadError::NotFound(_)) = presenter.failure() {
        let available: Vec<String> = bundle
            .index()
            .into_iter()
            .map(|(base, ext)| format!("{}.{}", base, ext))
            .collect();
        tracing::warn!(root = %bundle.root().display(), ?available, "Data file not in resource bundle");
    }

    if args.list {
        if let Some(e) = presenter.failure() {
            eprintln!("Warning: {}", e);
        }
        if !presenter.skipped().is_empty() {
            eprintln!(
                "Warning: skipped {} invalid entries",
                presenter.skipped().len()
            );
        }
        let stdout = std::io::stdout();
        print_records(&mut stdout.lock(), presenter.records(), args.json)?;
        return Ok(());
    }

    let mut app = App::new(presenter, &config);
    ui::run(&mut app).await.context("Terminal UI failed")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn cats() -> Vec<Record> {
        vec![
            Record::new("Felix", 1, "https://instagram.com/felix", None),
            Record::new("Tom", 2, "https://instagram.com/tom", Some("Chases mice".into())),
        ]
    }

    #[test]
    fn test_print_records_tab_separated() {
        let mut out = Vec::new();
        print_records(&mut out, &cats(), false).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "1\tFelix\thttps://instagram.com/felix\n2\tTom\thttps://instagram.com/tom\n"
        );
    }

    #[test]
    fn test_print_records_json() {
        let mut out = Vec::new();
        print_records(&mut out, &cats(), true).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value[0]["name"], "Felix");
        assert_eq!(value[0]["description"], "Hi I'm Felix");
        assert_eq!(value[1]["id"], 2);
        assert_eq!(value[1]["external_link"], "https://instagram.com/tom");
    }

    #[test]
    fn test_print_no_records() {
        let mut out = Vec::new();
        print_records(&mut out, &[], false).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_args_parse() {
        let args = Args::try_parse_from(["instacats", "--list", "--json", "--file", "Kittens.json"])
            .unwrap();
        assert!(args.list && args.json);
        assert_eq!(args.file.as_deref(), Some("Kittens.json"));
    }

    #[test]
    fn test_json_requires_list() {
        assert!(Args::try_parse_from(["instacats", "--json"]).is_err());
    }
}
