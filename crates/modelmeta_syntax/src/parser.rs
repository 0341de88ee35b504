//! Parser reducing a Java-style source file to its field/import triple.
//!
//! Single pass over the token stream. Only the pieces the registry needs are
//! modeled: the package declaration, imports, the class name, and field
//! declarations with their declared types. Everything else — annotations,
//! method bodies, constructors, initializer blocks, nested types — is skipped
//! by structural matching (brace/paren counting), never interpreted.

use modelmeta_core::{RawClass, RawField, RawType};
use tracing::trace;

use crate::error::{ParseError, Span};
use crate::lexer::{self, Punct, Token, TokenKind};

/// One parsed source file: its package (if declared) and its single class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceUnit {
    pub package: Option<String>,
    pub class: RawClass,
}

/// Parse one source file into a [`SourceUnit`].
///
/// ## Errors
/// Returns the first lex or structural error encountered. Interfaces, enums,
/// and records are rejected: only field-bearing classes are model candidates.
pub fn parse_unit(source: &str) -> Result<SourceUnit, ParseError> {
    let tokens = lexer::lex(source)?;
    Parser::new(&tokens).parse()
}

/// Member modifiers we recognize and discard (apart from `static`).
const MODIFIERS: &[&str] = &[
    "public",
    "private",
    "protected",
    "static",
    "final",
    "abstract",
    "transient",
    "volatile",
    "synchronized",
    "native",
    "strictfp",
    "sealed",
    "default",
];

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Token]) -> Self {
        Self { tokens, pos: 0 }
    }

    fn parse(mut self) -> Result<SourceUnit, ParseError> {
        self.skip_annotations()?;

        let package = if self.match_ident("package") {
            let name = self.dotted_name()?;
            self.expect_punct(Punct::Semi, "`;` after package declaration")?;
            Some(name)
        } else {
            None
        };

        let mut imports = Vec::new();
        loop {
            self.skip_annotations()?;
            if !self.match_ident("import") {
                break;
            }
            // `import static` members are never field types.
            let is_static = self.match_ident("static");
            let name = self.dotted_name()?;
            let mut is_wildcard = false;
            if self.match_punct(Punct::Dot) {
                self.expect_punct(Punct::Star, "`*` in wildcard import")?;
                is_wildcard = true;
            }
            self.expect_punct(Punct::Semi, "`;` after import")?;
            if is_static || is_wildcard {
                trace!(import = name, "ignoring non-type import");
            } else {
                imports.push(name);
            }
        }

        // Class header: modifiers, `class Name`, then everything up to `{`.
        self.skip_annotations()?;
        while self.peek_modifier().is_some() {
            self.advance();
        }
        for unsupported in ["interface", "enum", "record"] {
            if self.check_ident(unsupported) {
                return Err(ParseError::new(
                    format!("`{unsupported}` declarations are not model candidates"),
                    self.peek_span(),
                ));
            }
        }
        if !self.match_ident("class") {
            return Err(ParseError::new(
                "expected a class declaration",
                self.peek_span(),
            ));
        }
        let simple_name = self.expect_ident("class name")?;
        self.skip_until_lbrace()?;

        let fields = self.class_body()?;
        Ok(SourceUnit {
            package,
            class: RawClass {
                simple_name,
                imports,
                fields,
            },
        })
    }

    fn class_body(&mut self) -> Result<Vec<RawField>, ParseError> {
        let mut fields = Vec::new();
        loop {
            self.skip_annotations()?;
            if self.match_punct(Punct::RBrace) {
                return Ok(fields);
            }
            if self.is_at_end() {
                return Err(ParseError::new(
                    "unexpected end of file in class body",
                    self.peek_span(),
                ));
            }

            let mut is_static = false;
            loop {
                self.skip_annotations()?;
                match self.peek_modifier() {
                    Some(modifier) => {
                        if modifier == "static" {
                            is_static = true;
                        }
                        self.advance();
                    }
                    None => break,
                }
            }

            // Nested types and (static) initializer blocks: skip wholesale.
            if self.check_ident("class")
                || self.check_ident("interface")
                || self.check_ident("enum")
                || self.check_ident("record")
            {
                self.skip_until_lbrace()?;
                self.skip_balanced_from_open(Punct::LBrace, Punct::RBrace)?;
                continue;
            }
            if self.match_punct(Punct::LBrace) {
                self.skip_balanced_from_open(Punct::LBrace, Punct::RBrace)?;
                continue;
            }

            // Generic method type parameters (`public <T> T pick(...)`).
            if self.match_punct(Punct::Lt) {
                self.skip_balanced_from_open(Punct::Lt, Punct::Gt)?;
                let _ = self.parse_type()?;
                let _ = self.expect_ident("method name")?;
                self.skip_balanced(Punct::LParen, Punct::RParen)?;
                self.skip_method_tail()?;
                continue;
            }

            let ty = self.parse_type()?;

            // Constructor: the "type" we just read was the class name.
            if self.check_punct(Punct::LParen) {
                self.skip_balanced(Punct::LParen, Punct::RParen)?;
                self.skip_method_tail()?;
                continue;
            }

            let name = self.expect_ident("field or method name")?;
            while self.match_punct(Punct::LBracket) {
                self.expect_punct(Punct::RBracket, "`]` after array declarator")?;
            }

            if self.check_punct(Punct::LParen) {
                self.skip_balanced(Punct::LParen, Punct::RParen)?;
                self.skip_method_tail()?;
                continue;
            }

            // A field. Initializers and extra declarators (`int a = 1, b;`)
            // are skipped to the terminating `;`; like the original
            // generator, only the first declarator is kept.
            self.skip_to_statement_end()?;
            fields.push(RawField {
                name,
                ty,
                is_static,
            });
        }
    }

    fn parse_type(&mut self) -> Result<RawType, ParseError> {
        let mut name = self.expect_ident("type name")?;
        while self.check_punct(Punct::Dot) {
            self.advance();
            name.push('.');
            name.push_str(&self.expect_ident("type name segment")?);
        }

        let mut args = Vec::new();
        if self.match_punct(Punct::Lt) {
            if self.match_punct(Punct::Gt) {
                // diamond; no arguments to record
            } else {
                loop {
                    args.push(self.type_argument()?);
                    if self.match_punct(Punct::Comma) {
                        continue;
                    }
                    self.expect_punct(Punct::Gt, "`>` closing type arguments")?;
                    break;
                }
            }
        }

        // Array suffixes keep the base type name; element semantics are only
        // derived from type arguments.
        while self.match_punct(Punct::LBracket) {
            self.expect_punct(Punct::RBracket, "`]` after `[`")?;
        }

        Ok(RawType { name, args })
    }

    fn type_argument(&mut self) -> Result<RawType, ParseError> {
        if self.match_punct(Punct::Question) {
            if self.match_ident("extends") || self.match_ident("super") {
                return self.parse_type();
            }
            return Ok(RawType::simple("Object"));
        }
        self.parse_type()
    }

    fn dotted_name(&mut self) -> Result<String, ParseError> {
        let mut name = self.expect_ident("identifier")?;
        while self.check_punct(Punct::Dot) {
            // Stop before `.*`; the caller handles wildcard imports.
            if let TokenKind::Punct(Punct::Star) = self.peek_at(1).kind {
                break;
            }
            self.advance();
            name.push('.');
            name.push_str(&self.expect_ident("identifier segment")?);
        }
        Ok(name)
    }

    /// After a method's parameter list: a `throws` clause, then either `;`
    /// (abstract) or a brace-balanced body.
    fn skip_method_tail(&mut self) -> Result<(), ParseError> {
        loop {
            if self.is_at_end() {
                return Err(ParseError::new(
                    "unexpected end of file in method declaration",
                    self.peek_span(),
                ));
            }
            if self.match_punct(Punct::Semi) {
                return Ok(());
            }
            if self.match_punct(Punct::LBrace) {
                return self.skip_balanced_from_open(Punct::LBrace, Punct::RBrace);
            }
            self.advance();
        }
    }

    /// Consume everything up to and including the `;` ending a field
    /// statement, tracking nesting so semicolons inside anonymous classes or
    /// array initializers do not terminate early.
    fn skip_to_statement_end(&mut self) -> Result<(), ParseError> {
        let mut depth = 0usize;
        loop {
            if self.is_at_end() {
                return Err(ParseError::new(
                    "unexpected end of file in field declaration",
                    self.peek_span(),
                ));
            }
            let token = self.advance();
            match token.kind {
                TokenKind::Punct(Punct::LParen | Punct::LBrace | Punct::LBracket) => depth += 1,
                TokenKind::Punct(Punct::RParen | Punct::RBrace | Punct::RBracket) => {
                    depth = depth.saturating_sub(1);
                }
                TokenKind::Punct(Punct::Semi) if depth == 0 => return Ok(()),
                _ => {}
            }
        }
    }

    fn skip_annotations(&mut self) -> Result<(), ParseError> {
        while self.match_punct(Punct::At) {
            self.expect_ident("annotation name")?;
            while self.match_punct(Punct::Dot) {
                self.expect_ident("annotation name segment")?;
            }
            if self.check_punct(Punct::LParen) {
                self.skip_balanced(Punct::LParen, Punct::RParen)?;
            }
        }
        Ok(())
    }

    /// Consume everything up to and including the next `{` (generics,
    /// `extends`/`implements` clauses on a type header).
    fn skip_until_lbrace(&mut self) -> Result<(), ParseError> {
        loop {
            if self.is_at_end() {
                return Err(ParseError::new(
                    "expected `{` before end of file",
                    self.peek_span(),
                ));
            }
            if self.match_punct(Punct::LBrace) {
                return Ok(());
            }
            self.advance();
        }
    }

    fn skip_balanced(&mut self, open: Punct, close: Punct) -> Result<(), ParseError> {
        self.expect_punct(open, "opening delimiter")?;
        self.skip_balanced_from_open(open, close)
    }

    fn skip_balanced_from_open(&mut self, open: Punct, close: Punct) -> Result<(), ParseError> {
        let mut depth = 1usize;
        while depth > 0 {
            if self.is_at_end() {
                return Err(ParseError::new(
                    "unbalanced delimiters",
                    self.peek_span(),
                ));
            }
            let token = self.advance();
            match &token.kind {
                TokenKind::Punct(p) if *p == open => depth += 1,
                TokenKind::Punct(p) if *p == close => depth -= 1,
                _ => {}
            }
        }
        Ok(())
    }

    // ========================================================================
    // Token-stream helpers
    // ========================================================================

    fn is_at_end(&self) -> bool {
        matches!(self.peek().kind, TokenKind::Eof)
    }

    fn peek(&self) -> &Token {
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn peek_at(&self, offset: usize) -> &Token {
        let idx = (self.pos + offset).min(self.tokens.len() - 1);
        &self.tokens[idx]
    }

    fn peek_span(&self) -> Span {
        self.peek().span
    }

    fn advance(&mut self) -> &Token {
        if !self.is_at_end() {
            self.pos += 1;
        }
        &self.tokens[self.pos - 1]
    }

    fn check_punct(&self, punct: Punct) -> bool {
        self.peek().is_punct(punct)
    }

    fn match_punct(&mut self, punct: Punct) -> bool {
        if self.check_punct(punct) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect_punct(&mut self, punct: Punct, what: &str) -> Result<(), ParseError> {
        if self.match_punct(punct) {
            Ok(())
        } else {
            Err(ParseError::new(
                format!("expected {what}"),
                self.peek_span(),
            ))
        }
    }

    fn check_ident(&self, name: &str) -> bool {
        self.peek().is_ident(name)
    }

    fn match_ident(&mut self, name: &str) -> bool {
        if self.check_ident(name) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn peek_modifier(&self) -> Option<&str> {
        if let TokenKind::Ident(name) = &self.peek().kind {
            if MODIFIERS.contains(&name.as_str()) {
                return Some(name);
            }
        }
        None
    }

    fn expect_ident(&mut self, what: &str) -> Result<String, ParseError> {
        if let TokenKind::Ident(name) = &self.peek().kind {
            let name = name.clone();
            self.advance();
            Ok(name)
        } else {
            Err(ParseError::new(
                format!("expected {what}"),
                self.peek_span(),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_package_imports_and_fields() {
        let source = r#"
            package com.example.models;

            import java.util.List;
            import com.example.common.Address;
            import java.util.*;
            import static java.util.Collections.emptyList;

            public class Person {
                private String name;
                private Address address;
                private List<Person> friends;
            }
        "#;
        let unit = parse_unit(source).unwrap();
        assert_eq!(unit.package.as_deref(), Some("com.example.models"));
        assert_eq!(
            unit.class.imports,
            vec!["java.util.List", "com.example.common.Address"]
        );
        let names: Vec<&str> = unit.class.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["name", "address", "friends"]);
        assert_eq!(
            unit.class.fields[2].ty,
            RawType::parameterized("List", vec![RawType::simple("Person")])
        );
    }

    #[test]
    fn static_flag_is_captured() {
        let source = "class C { static long SERIAL; String name; }";
        let unit = parse_unit(source).unwrap();
        assert!(unit.class.fields[0].is_static);
        assert!(!unit.class.fields[1].is_static);
    }

    #[test]
    fn methods_constructors_and_annotations_are_skipped() {
        let source = r#"
            public class Person {
                @JsonProperty("first_name")
                private String name;

                public Person(String name) { this.name = name; }

                @Override
                public String toString() { return "Person{" + name + "}"; }

                public <T> T pick(List<T> from) { return from.get(0); }
            }
        "#;
        let unit = parse_unit(source).unwrap();
        let names: Vec<&str> = unit.class.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["name"]);
    }

    #[test]
    fn initializers_do_not_confuse_field_boundaries() {
        let source = r#"
            class C {
                private String greeting = "hello; world";
                private int[] counts = {1, 2, 3};
                private Runnable task = new Runnable() {
                    public void run() { int x = 1; }
                };
                private String after;
            }
        "#;
        let unit = parse_unit(source).unwrap();
        let names: Vec<&str> = unit.class.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["greeting", "counts", "task", "after"]);
    }

    #[test]
    fn nested_generics_and_wildcards() {
        let source = "class C { Map<String, List<Person>> index; List<? extends Person> some; List<?> any; }";
        let unit = parse_unit(source).unwrap();
        let index = &unit.class.fields[0].ty;
        assert_eq!(index.name, "Map");
        assert_eq!(index.args[0], RawType::simple("String"));
        assert_eq!(
            index.args[1],
            RawType::parameterized("List", vec![RawType::simple("Person")])
        );
        assert_eq!(unit.class.fields[1].ty.args[0], RawType::simple("Person"));
        assert_eq!(unit.class.fields[2].ty.args[0], RawType::simple("Object"));
    }

    #[test]
    fn nested_types_are_skipped() {
        let source = r#"
            class C {
                private String kept;
                static class Inner { String hidden; }
                private String alsoKept;
            }
        "#;
        let unit = parse_unit(source).unwrap();
        let names: Vec<&str> = unit.class.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["kept", "alsoKept"]);
    }

    #[test]
    fn interfaces_are_rejected() {
        let err = parse_unit("public interface Marker {}").unwrap_err();
        assert!(err.message.contains("interface"));
    }

    #[test]
    fn only_first_declarator_is_kept() {
        let unit = parse_unit("class C { int a = 1, b, c; String d; }").unwrap();
        let names: Vec<&str> = unit.class.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["a", "d"]);
    }
}
