//! Property tests over generated templates.

use litemp::{Context, Template};
use proptest::prelude::*;

/// Literal text without any `{` so no directive can start.
fn plain_text() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ,.!\\n<>/=\"-]{0,40}"
}

fn identifier() -> impl Strategy<Value = String> {
    "[_a-zA-Z][_a-zA-Z0-9]{0,8}"
}

proptest! {
    #[test]
    fn plain_text_renders_verbatim(text in plain_text()) {
        let template = Template::new(&text, []);
        prop_assert!(template.is_ok());
        let rendered = template.map(|t| t.render(None));
        prop_assert_eq!(rendered, Ok(Ok(text)));
    }

    #[test]
    fn rendering_is_idempotent(
        prefix in plain_text(),
        name in identifier(),
        value in "[a-z]{0,10}",
        items in prop::collection::vec(0_i64..100, 0..8),
    ) {
        // `item` is the loop variable and `items` the loop source
        prop_assume!(name != "item" && name != "items");
        let text = format!(
            "{prefix}{{{{{name}}}}}{{% for item in items %}}[{{{{item}}}}]{{% endfor %}}"
        );
        let template = Template::new(&text, [])
            .map_err(|err| TestCaseError::fail(format!("{text:?}: {err}")))?;

        let context = Context::new()
            .with(name.as_str(), value.as_str())
            .with("items", items.clone());
        let first = template.render(Some(&context));
        let second = template.render(Some(&context));
        prop_assert_eq!(&first, &second);

        let listed: String = items.iter().map(|n| format!("[{n}]")).collect();
        prop_assert_eq!(first, Ok(format!("{prefix}{value}{listed}")));
    }
}
