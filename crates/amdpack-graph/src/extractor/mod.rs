//! AMD dependency extraction and module naming.
//!
//! `AmdExtractor` parses a file with Oxc and reads the dependency lists of
//! `define`, `require` and `requirejs` calls. It never executes code.

mod visitor;

use oxc_allocator::Allocator;
use oxc_parser::Parser;
use oxc_span::SourceType;

use visitor::AmdVisitor;

/// Scans module source for declared dependencies.
pub trait DependencyExtractor: Send + Sync {
    /// Dependency ids in order of first appearance, without duplicates.
    fn extract_dependencies(&self, content: &str) -> Vec<String>;

    /// Content prepared for concatenation into a bundle under `module_name`.
    fn rewrite_content(&self, content: &str, module_name: &str) -> String;
}

/// Oxc-backed extractor for AMD modules.
///
/// Recognized forms:
///
/// ```js
/// define(["a", "b"], function (a, b) {});
/// define("named", ["a"], function (a) {});
/// define(function (require) { var a = require("a"); });
/// require(["a"], function (a) {});
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct AmdExtractor;

impl AmdExtractor {
    pub fn new() -> Self {
        Self
    }

    fn scan(&self, content: &str) -> Option<AmdVisitor> {
        let allocator = Allocator::default();
        let parser_return = Parser::new(&allocator, content, SourceType::cjs()).parse();

        // Graceful degradation: unparseable files contribute no edges.
        if parser_return.panicked || !parser_return.errors.is_empty() {
            tracing::warn!(
                "Failed to parse module ({} errors); dependencies ignored",
                parser_return.errors.len()
            );
            return None;
        }

        let mut visitor = AmdVisitor::default();
        visitor.scan_program(&parser_return.program);
        Some(visitor)
    }
}

impl DependencyExtractor for AmdExtractor {
    fn extract_dependencies(&self, content: &str) -> Vec<String> {
        self.scan(content)
            .map(|visitor| visitor.dependencies)
            .unwrap_or_default()
    }

    fn rewrite_content(&self, content: &str, module_name: &str) -> String {
        let Some(visitor) = self.scan(content) else {
            return content.to_string();
        };

        if visitor.anonymous_defines.is_empty() {
            return content.to_string();
        }

        let name = match serde_json::to_string(module_name) {
            Ok(quoted) => quoted,
            Err(_) => return content.to_string(),
        };

        let mut output = String::with_capacity(content.len() + visitor.anonymous_defines.len() * (name.len() + 2));
        let mut cursor = 0usize;
        for offset in visitor.anonymous_defines {
            let offset = offset as usize;
            output.push_str(&content[cursor..offset]);
            output.push_str(&name);
            output.push_str(", ");
            cursor = offset;
        }
        output.push_str(&content[cursor..]);
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_define_dependencies() {
        let deps = AmdExtractor.extract_dependencies(
            r#"define(["jquery", "app/util", "exports"], function ($, util, exports) {});"#,
        );
        assert_eq!(deps, vec!["jquery", "app/util", "exports"]);
    }

    #[test]
    fn extracts_named_define_dependencies() {
        let deps = AmdExtractor
            .extract_dependencies(r#"define("app/main", ["./util"], function (util) {});"#);
        assert_eq!(deps, vec!["./util"]);
    }

    #[test]
    fn extracts_commonjs_sugar_and_require_calls() {
        let source = r#"
            define(function (require) {
                var a = require("app/a");
                var b = require("app/b");
                require(["app/lazy", "app/a"], function (lazy) {});
                return { a: a, b: b };
            });
        "#;
        let deps = AmdExtractor.extract_dependencies(source);
        assert_eq!(deps, vec!["app/a", "app/b", "app/lazy"]);
    }

    #[test]
    fn ignores_unrelated_calls() {
        let deps = AmdExtractor.extract_dependencies(r#"load(["x"]); foo.define(["y"]);"#);
        assert!(deps.is_empty());
    }

    #[test]
    fn unparseable_source_yields_no_dependencies() {
        let deps = AmdExtractor.extract_dependencies("define([\"a\"], function ( {");
        assert!(deps.is_empty());
    }

    #[test]
    fn names_anonymous_define() {
        let rewritten = AmdExtractor.rewrite_content(
            r#"define(["jquery"], function ($) { return $; });"#,
            "app/main",
        );
        assert_eq!(
            rewritten,
            r#"define("app/main", ["jquery"], function ($) { return $; });"#
        );
    }

    #[test]
    fn names_factory_only_define() {
        let rewritten = AmdExtractor.rewrite_content("define(function () {});", "app/util");
        assert_eq!(rewritten, r#"define("app/util", function () {});"#);
    }

    #[test]
    fn leaves_named_define_untouched() {
        let source = r#"define("custom", [], function () {});"#;
        assert_eq!(AmdExtractor.rewrite_content(source, "app/main"), source);
    }

    #[test]
    fn leaves_plain_scripts_untouched() {
        let source = "var x = 1;\nwindow.x = x;";
        assert_eq!(AmdExtractor.rewrite_content(source, "legacy"), source);
    }
}
