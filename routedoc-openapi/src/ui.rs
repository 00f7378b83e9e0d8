use serde_json::{json, Map, Value};

use crate::config::{SwaggerConfig, Theme};

const DARK_MODE_STYLE: &str = r#"
    <style>
        @media (prefers-color-scheme: dark) {
            body {
                background-color: #181818;
                color: #04ccef;
            }
            .swagger-ui {
                filter: invert(92%) hue-rotate(180deg);
            }

            .swagger-ui .microlight {
                filter: invert(100%) hue-rotate(180deg);
            }
        }
    </style>"#;

/// Options handed to `SwaggerUIBundle`: the defaults overlaid by the
/// author's `swaggerOptions` keys.
fn bundle_options(config: &SwaggerConfig) -> Value {
    let mut options: Map<String, Value> = Map::new();
    options.insert("url".into(), json!("swagger.json"));
    options.insert("dom_id".into(), json!("#swagger-ui"));
    if let Some(Value::Object(extra)) = config.ui.swagger_options.as_ref() {
        for (key, value) in extra {
            options.insert(key.clone(), value.clone());
        }
    }
    Value::Object(options)
}

fn stylesheets(theme: &Theme) -> String {
    match theme {
        Theme::Single(href) => format!(r#"<link rel="stylesheet" href="{href}" />"#),
        Theme::Split { light, dark } => format!(
            r#"<link rel="stylesheet" media="(prefers-color-scheme: light)" href="{light}" />
    <link rel="stylesheet" media="(prefers-color-scheme: dark)" href="{dark}" />"#
        ),
    }
}

/// Render the Swagger UI page pointing at the sibling `swagger.json`.
pub fn render_ui(config: &SwaggerConfig) -> String {
    let info = &config.info;
    let description = info.description.as_deref().unwrap_or("");
    let theme = config.ui.resolved_theme();
    let dark_mode = match theme {
        Theme::Single(_) if config.ui.auto_dark_mode => DARK_MODE_STYLE,
        _ => "",
    };
    let stylesheets = stylesheets(&theme);
    let bundle = config.ui.bundle_url();
    let options = bundle_options(config);

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8" />
    <meta name="viewport" content="width=device-width, initial-scale=1" />
    <title>{title} {version}</title>
    <meta
        name="description"
        content="{description}"
    />
    <meta
        name="og:description"
        content="{description}"
    />{dark_mode}
    {stylesheets}
</head>
<body>
    <div id="swagger-ui"></div>
    <script src="{bundle}" crossorigin></script>
    <script>
        window.onload = () => {{
            window.ui = SwaggerUIBundle({options});
        }};
    </script>
</body>
</html>"#,
        title = info.title,
        version = info.version,
    )
}
