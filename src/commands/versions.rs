use crate::core::{
    config::Config,
    version::{ResolvedVersion, VersionSelector, DEFAULT_SELECTOR},
};
use crate::error::{InstallerError, Result};

pub fn list_versions(format: &str) -> Result<()> {
    if format != "text" && format != "json" {
        return Err(InstallerError::config_error(format!(
            "Unknown output format '{format}' (expected text or json)"
        )));
    }

    let config = Config::load()?;
    let versions = resolve_all(&config.download_base_url);

    if format == "json" {
        println!("{}", render_json(&versions)?);
    } else {
        print!("{}", render_text(&versions));
    }

    Ok(())
}

pub fn resolve_all(base_url: &str) -> Vec<ResolvedVersion> {
    VersionSelector::ALL
        .iter()
        .map(|selector| selector.resolve(base_url))
        .collect()
}

fn render_json(versions: &[ResolvedVersion]) -> Result<String> {
    Ok(serde_json::to_string_pretty(versions)?)
}

fn render_text(versions: &[ResolvedVersion]) -> String {
    let mut out = String::from("Available PrestaShop versions:\n");

    for resolved in versions {
        let marker = if resolved.selector == DEFAULT_SELECTOR {
            " (default)"
        } else {
            ""
        };
        out.push_str(&format!(
            "  {} -> {} [{}]{}\n      {}\n",
            resolved.selector, resolved.version, resolved.layout, marker, resolved.url
        ));
    }

    out.push_str("\nInstall: prestashop install <directory> [version]\n");
    out
}
