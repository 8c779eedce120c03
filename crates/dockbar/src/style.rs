use std::path::Path;

use anyhow::{anyhow, Context, Result};
use gtk::prelude::*;

use crate::{display_backend::BAR_WIDGET_NAME, opts::Urgency, paths::DockbarPaths, util::replace_env_var_references};

fn background_color(urgency: Urgency) -> &'static str {
    match urgency {
        Urgency::Low => "darkgreen",
        Urgency::Normal => "darkred",
        Urgency::Critical => "red",
    }
}

/// The stylesheet every bar gets, colored by urgency.
pub fn builtin_css(urgency: Urgency) -> String {
    format!(
        "window#{name} {{\n  background-color: {color};\n}}\nwindow#{name} label {{\n  color: white;\n}}\n",
        name = BAR_WIDGET_NAME,
        color = background_color(urgency),
    )
}

/// read an scss file, replace all environment variable references within it and
/// then parse it into css.
pub fn parse_scss_from_file(path: &Path) -> Result<String> {
    let config_dir = path.parent().context("Given SCSS file has no parent directory?!")?;
    let scss_file_content =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read SCSS file {}", path.display()))?;
    let file_content = replace_env_var_references(scss_file_content);
    let grass_config = grass::Options::default().load_path(config_dir);
    grass::from_string(file_content, &grass_config).map_err(|err| anyhow!("SCSS parsing error: {}", err))
}

/// The user stylesheet, if there is one.
pub fn load_user_css(paths: &DockbarPaths) -> Result<Option<String>> {
    let scss_path = paths.get_scss_path();
    if !scss_path.exists() {
        log::debug!("no user stylesheet at {}", scss_path.display());
        return Ok(None);
    }
    parse_scss_from_file(&scss_path).map(Some)
}

/// Install the built-in and user stylesheets for the default screen.
/// A broken user stylesheet is logged and skipped.
pub fn apply_styles(urgency: Urgency, paths: &DockbarPaths) -> Result<()> {
    let screen = gdk::Screen::default().context("Failed to get the default screen")?;

    let builtin_provider = gtk::CssProvider::new();
    builtin_provider.load_from_data(builtin_css(urgency).as_bytes())?;
    gtk::StyleContext::add_provider_for_screen(&screen, &builtin_provider, gtk::STYLE_PROVIDER_PRIORITY_APPLICATION);

    match load_user_css(paths) {
        Ok(Some(css)) => {
            let user_provider = gtk::CssProvider::new();
            match user_provider.load_from_data(css.as_bytes()) {
                Ok(()) => {
                    gtk::StyleContext::add_provider_for_screen(&screen, &user_provider, gtk::STYLE_PROVIDER_PRIORITY_USER);
                    log::info!("Loaded user stylesheet from {}", paths.get_scss_path().display());
                }
                Err(err) => log::error!("Failed to load user stylesheet: {}", err),
            }
        }
        Ok(None) => {}
        Err(err) => log::error!("{:?}", err),
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_builtin_css() {
        assert_eq!(
            "window#bar {\n  background-color: darkred;\n}\nwindow#bar label {\n  color: white;\n}\n",
            builtin_css(Urgency::Normal)
        );
        assert!(builtin_css(Urgency::Critical).contains("background-color: red;"));
        assert!(builtin_css(Urgency::Low).contains("background-color: darkgreen;"));
    }

    #[test]
    fn test_user_scss() {
        let dir = std::env::temp_dir().join(format!("dockbar-style-test-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let paths = DockbarPaths::from_config_dir(&dir).unwrap();
        assert_eq!(None, load_user_css(&paths).unwrap());

        std::fs::write(paths.get_scss_path(), "$bg: navy;\nwindow#bar { background-color: $bg; }\n").unwrap();
        let css = load_user_css(&paths).unwrap().unwrap();
        assert!(css.contains("background-color: navy;"));

        std::fs::write(paths.get_scss_path(), "window#bar { background-color: ").unwrap();
        assert!(load_user_css(&paths).is_err());

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
