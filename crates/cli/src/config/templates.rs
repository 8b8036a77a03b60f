use serde_json::{Value, json};

/// Starting manifest for a freshly initialised project
pub fn manifest_template(name: &str) -> Value {
    json!({
        "name": name,
        "identifier": format!("com.example.{}", identifier_slug(name)),
        "version": "0.1.0",
        "description": "",
        "compatibleVersion": 3,
        "bundleVersion": 1,
        "icon": "icon.png",
        "commands": [],
        "menu": {
            "title": name,
            "items": []
        }
    })
}

pub fn command_template(name: &str) -> String {
    format!(
        r#"// {name}

export default function (context) {{
  context.document.showMessage("{name} is alive");
}}
"#
    )
}

pub fn ui_template(name: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
  <head>
    <meta charset="utf-8" />
    <title>{name}</title>
  </head>
  <body>
    <h1>{name}</h1>
  </body>
</html>
"#
    )
}

/// Lowercase, dash separated form of a display name
pub fn identifier_slug(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    if slug.is_empty() {
        slug.push_str("plugin");
    }
    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_slug() {
        assert_eq!(identifier_slug("My Cool Plugin"), "my-cool-plugin");
        assert_eq!(identifier_slug("  --Weird__name!! "), "weird-name");
        assert_eq!(identifier_slug("🙂"), "plugin");
    }

    #[test]
    fn test_manifest_template() {
        let manifest = manifest_template("Color Tools");
        assert_eq!(manifest["identifier"], "com.example.color-tools");
        assert!(manifest["commands"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_command_template_mentions_name() {
        assert!(command_template("hello").contains("hello is alive"));
        assert!(ui_template("Panel").contains("<title>Panel</title>"));
    }
}
