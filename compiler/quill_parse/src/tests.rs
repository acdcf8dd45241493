use pretty_assertions::assert_eq;
use quill_ir::SourceFile;

use super::*;

#[test]
fn canonical_form_of_template() {
    let interner = StringInterner::new();
    let source = "<#-- note --><#assign x=1>Hi ${ f( x,'a' ) }!<@m y=x/>";
    let parsed = parse_template(source, &interner);
    assert_eq!(
        parsed.map(|p| p.canonical_form(&interner)),
        Ok(r#"<#assign x = 1>Hi ${f(x, "a")}!<@m y=x/>"#.to_string())
    );
}

#[test]
fn template_canonical_form_reparses_equal() {
    let interner = StringInterner::new();
    let source = "<#function add a b=1><#return a + b></#function>${add(2)}<@show 1, [2]/>";
    let first = parse_template(source, &interner);
    let reparsed = first
        .as_ref()
        .map_err(|e| e.clone())
        .and_then(|p| parse_template(&p.canonical_form(&interner), &interner));
    assert_eq!(first, reparsed);
}

#[test]
fn lex_errors_surface_as_parse_errors() {
    let interner = StringInterner::new();
    let err = parse_template("${\"\\q\"}", &interner).err();
    assert_eq!(
        err.map(|e| e.kind),
        Some(ParseErrorKind::Lex(quill_lexer::LexErrorKind::InvalidStringEscape {
            escape_char: 'q'
        }))
    );
}

#[test]
fn render_points_at_source() {
    let interner = StringInterner::new();
    let text = "line one\n<#macro m><#return 1></#macro>";
    let file = SourceFile::new("page.ftl", text);
    let rendered = parse_template(text, &interner)
        .err()
        .map(|e| e.render(&file))
        .unwrap_or_default();
    assert_eq!(
        rendered,
        "error: only a `#function` can return a value\n --> page.ftl:2:11\n  |\n2 | <#macro m><#return 1></#macro>\n  |           ^^^^^^^^^^^"
    );
}
