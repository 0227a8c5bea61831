use std::fs;
use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result, anyhow, bail};

/// Site and display preferences, persisted as five newline-delimited
/// values in fixed order: site name, latitude, longitude (west negative),
/// font size in points, dial width in pixels.
#[derive(Clone, Debug, PartialEq)]
pub struct SitePreferences {
    pub site_name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub font_size: u32,
    pub dial_width: u32,
}

impl Default for SitePreferences {
    fn default() -> Self {
        Self {
            site_name: "Stull Observatory".to_string(),
            latitude: 42.249999,
            longitude: -77.783302,
            font_size: 16,
            dial_width: 420,
        }
    }
}

/// Load preferences, falling back to the built-in defaults on any problem.
/// A missing or unreadable file is not an error here; the clock always
/// starts.
pub fn load_preferences(path: &Path) -> SitePreferences {
    match fs::read_to_string(path) {
        Ok(text) => parse_preferences_text(&text),
        Err(_) => SitePreferences::default(),
    }
}

/// Apply lines in file order until the first malformed one; fields parsed
/// before that point stick, the rest keep their defaults.
pub fn parse_preferences_text(text: &str) -> SitePreferences {
    let mut prefs = SitePreferences::default();
    let mut lines = text.lines();
    let Some(name) = lines.next() else {
        return prefs;
    };
    prefs.site_name = name.trim().to_string();
    let Some(latitude) = next_parsed::<f64>(&mut lines) else {
        return prefs;
    };
    prefs.latitude = latitude;
    let Some(longitude) = next_parsed::<f64>(&mut lines) else {
        return prefs;
    };
    prefs.longitude = longitude;
    let Some(font_size) = next_parsed::<u32>(&mut lines) else {
        return prefs;
    };
    prefs.font_size = font_size;
    let Some(dial_width) = next_parsed::<u32>(&mut lines) else {
        return prefs;
    };
    prefs.dial_width = dial_width;
    prefs
}

fn next_parsed<T: FromStr>(lines: &mut std::str::Lines<'_>) -> Option<T> {
    lines.next()?.trim().parse().ok()
}

pub fn save_preferences(path: &Path, prefs: &SitePreferences) -> Result<()> {
    let text = format!(
        "{}\n{}\n{}\n{}\n{}\n",
        prefs.site_name, prefs.latitude, prefs.longitude, prefs.font_size, prefs.dial_width
    );
    fs::write(path, text)
        .with_context(|| format!("unable to write preferences to {}", path.display()))
}

/// Validated update from the settings form. Either every field parses and
/// the whole update applies, or nothing changes and the caller surfaces
/// the error.
pub fn apply_site_update(
    prefs: &mut SitePreferences,
    site_name: &str,
    latitude: &str,
    longitude: &str,
    font_size: &str,
    dial_width: &str,
) -> Result<()> {
    let latitude: f64 = parse_field(latitude, "latitude")?;
    let longitude: f64 = parse_field(longitude, "longitude")?;
    if !latitude.is_finite() || !longitude.is_finite() {
        bail!("latitude and longitude must be finite numbers");
    }
    let font_size: u32 = parse_field(font_size, "font size")?;
    let dial_width: u32 = parse_field(dial_width, "dial width")?;
    if font_size == 0 {
        bail!("font size must be greater than zero");
    }
    if dial_width == 0 {
        bail!("dial width must be greater than zero");
    }
    prefs.site_name = site_name.trim().to_string();
    prefs.latitude = latitude;
    prefs.longitude = longitude;
    prefs.font_size = font_size;
    prefs.dial_width = dial_width;
    Ok(())
}

fn parse_field<T: FromStr>(raw: &str, what: &str) -> Result<T> {
    raw.trim()
        .parse()
        .map_err(|_| anyhow!("{what} must be a number, got {raw:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let prefs = load_preferences(Path::new("/definitely/not/here/settings.par"));
        assert_eq!(prefs, SitePreferences::default());
    }

    #[test]
    fn full_file_parses_every_field() {
        let prefs = parse_preferences_text("Kitt Peak\n31.9583\n-111.5997\n14\n380\n");
        assert_eq!(prefs.site_name, "Kitt Peak");
        assert!((prefs.latitude - 31.9583).abs() < 1e-9);
        assert!((prefs.longitude - (-111.5997)).abs() < 1e-9);
        assert_eq!(prefs.font_size, 14);
        assert_eq!(prefs.dial_width, 380);
    }

    #[test]
    fn parsing_stops_at_the_first_malformed_line() {
        let prefs = parse_preferences_text("Kitt Peak\nnot-a-number\n-111.5997\n14\n380\n");
        assert_eq!(prefs.site_name, "Kitt Peak");
        let defaults = SitePreferences::default();
        assert_eq!(prefs.latitude, defaults.latitude);
        assert_eq!(prefs.dial_width, defaults.dial_width);
    }

    #[test]
    fn short_file_keeps_trailing_defaults() {
        let prefs = parse_preferences_text("Mauna Kea\n19.8206\n");
        assert_eq!(prefs.site_name, "Mauna Kea");
        assert!((prefs.latitude - 19.8206).abs() < 1e-9);
        assert_eq!(prefs.longitude, SitePreferences::default().longitude);
    }

    #[test]
    fn empty_file_is_all_defaults() {
        assert_eq!(parse_preferences_text(""), SitePreferences::default());
    }

    #[test]
    fn save_writes_the_five_line_format() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("settings.par");
        let prefs = SitePreferences::default();
        save_preferences(&path, &prefs).expect("save succeeds");
        let text = fs::read_to_string(&path).expect("file written");
        assert_eq!(text, "Stull Observatory\n42.249999\n-77.783302\n16\n420\n");
        assert_eq!(parse_preferences_text(&text), prefs);
    }

    #[test]
    fn update_applies_all_fields_together() {
        let mut prefs = SitePreferences::default();
        apply_site_update(&mut prefs, "Cerro Tololo", "-30.169", "-70.806", "18", "500")
            .expect("update succeeds");
        assert_eq!(prefs.site_name, "Cerro Tololo");
        assert!((prefs.latitude - (-30.169)).abs() < 1e-9);
        assert_eq!(prefs.dial_width, 500);
    }

    #[test]
    fn update_refuses_non_numeric_fields_and_keeps_prior_values() {
        let mut prefs = SitePreferences::default();
        let err = apply_site_update(&mut prefs, "Elsewhere", "north", "-70.8", "18", "500")
            .expect_err("latitude should be rejected");
        assert!(err.to_string().contains("latitude"));
        assert_eq!(prefs, SitePreferences::default());
    }

    #[test]
    fn update_refuses_zero_dial_width() {
        let mut prefs = SitePreferences::default();
        let err = apply_site_update(&mut prefs, "Site", "10.0", "20.0", "16", "0")
            .expect_err("zero width should be rejected");
        assert!(err.to_string().contains("dial width"));
    }
}
