//! AST visitor collecting AMD dependency ids.

use oxc_ast::ast::{
    Argument, ArrayExpression, ArrayExpressionElement, CallExpression, Expression, Program,
};
use oxc_ast_visit::{walk, Visit};
use oxc_span::GetSpan;
use rustc_hash::FxHashSet;

#[derive(Debug, Default)]
pub(super) struct AmdVisitor {
    pub(super) dependencies: Vec<String>,
    /// Byte offsets of the first argument of every anonymous `define(...)`.
    pub(super) anonymous_defines: Vec<u32>,
    seen: FxHashSet<String>,
}

impl AmdVisitor {
    pub(super) fn scan_program(&mut self, program: &Program<'_>) {
        self.visit_program(program);
        self.anonymous_defines.sort_unstable();
        self.anonymous_defines.dedup();
    }

    fn push(&mut self, id: &str) {
        if self.seen.insert(id.to_string()) {
            self.dependencies.push(id.to_string());
        }
    }

    fn push_array(&mut self, array: &ArrayExpression<'_>) {
        for element in &array.elements {
            if let ArrayExpressionElement::StringLiteral(lit) = element {
                self.push(lit.value.as_str());
            }
        }
    }

    fn visit_define(&mut self, call: &CallExpression<'_>) {
        let mut args = call.arguments.iter();
        match args.next() {
            Some(Argument::StringLiteral(_)) => {
                if let Some(Argument::ArrayExpression(array)) = args.next() {
                    self.push_array(array);
                }
            }
            Some(first) => {
                if let Argument::ArrayExpression(array) = first {
                    self.push_array(array);
                }
                self.anonymous_defines.push(first.span().start);
            }
            None => {}
        }
    }

    fn visit_require(&mut self, call: &CallExpression<'_>) {
        match call.arguments.first() {
            Some(Argument::ArrayExpression(array)) => self.push_array(array),
            Some(Argument::StringLiteral(lit)) if call.arguments.len() == 1 => {
                self.push(lit.value.as_str());
            }
            _ => {}
        }
    }
}

impl<'a> Visit<'a> for AmdVisitor {
    fn visit_call_expression(&mut self, call: &CallExpression<'a>) {
        if let Expression::Identifier(ident) = &call.callee {
            match ident.name.as_str() {
                "define" => self.visit_define(call),
                "require" | "requirejs" => self.visit_require(call),
                _ => {}
            }
        }
        walk::walk_call_expression(self, call);
    }
}
