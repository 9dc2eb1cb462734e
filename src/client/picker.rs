//! Grouped model picker rendering.

use console::style;

use crate::catalog::{ModelDescriptor, group_by_category};

/// Render the catalog as labeled category sections, in display order.
///
/// The currently selected model is marked with `*`. Categories outside the
/// display order never appear (see `catalog::group_by_category`).
pub fn render_picker(models: &[ModelDescriptor], selected: &str) -> String {
    let groups = group_by_category(models);
    if groups.is_empty() {
        return "No models available.\n".to_string();
    }

    let mut out = String::new();
    for (category, members) in groups {
        out.push_str(&format!("{}\n", style(category).bold()));
        for model in members {
            let marker = if model.id == selected { "*" } else { " " };
            out.push_str(&format!("  {marker} {:<42} {}\n", model.id, model.name));
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::builtin_models;

    #[test]
    fn test_sections_in_display_order() {
        let rendered = render_picker(&builtin_models(), "minimaxai/minimax-m2");
        let general = rendered.find("General Purpose").unwrap();
        let nvidia = rendered.find("NVIDIA").unwrap();
        let code = rendered.find("Code").unwrap();
        assert!(general < nvidia && nvidia < code);
    }

    #[test]
    fn test_selected_model_marked() {
        let rendered = render_picker(&builtin_models(), "microsoft/phi-4");
        assert!(rendered.contains("* microsoft/phi-4"));
        assert!(rendered.contains("  minimaxai/minimax-m2"));
    }

    #[test]
    fn test_unlisted_category_not_rendered() {
        let models = vec![ModelDescriptor {
            id: "x/mystery".to_string(),
            name: "Mystery".to_string(),
            category: "Unknown".to_string(),
        }];
        assert_eq!(render_picker(&models, ""), "No models available.\n");
    }

    #[test]
    fn test_empty_catalog() {
        assert_eq!(render_picker(&[], ""), "No models available.\n");
    }
}
