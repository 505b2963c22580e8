//! Fix builders: structural edits expressed as text splices.
//!
//! Each builder receives already-identified nodes plus the parsed file and
//! returns the edit realizing one structural change, or `None` when the
//! change cannot be made safely (unterminated calls, comments inside an
//! object that would be collapsed).

use crate::fixer::TextEdit;
use nestlint_common::TextRange;
use nestlint_parser::{
    CallExpression, Decorator, ImportDeclaration, ObjectLiteral, PropertyDeclaration, SourceFile,
};
use nestlint_scanner::SyntaxKind;

/// Remove a decorator.
///
/// - followed by more code on its line: remove it and the whitespace up to
///   that code;
/// - alone on its line: remove the whole line, or only the decorator when a
///   comment follows it;
/// - otherwise: remove it together with the whitespace before it.
pub fn remove_decorator(file: &SourceFile, decorator: &Decorator) -> TextEdit {
    let range = decorator.range;
    let next = file
        .token_after(range.end)
        .filter(|token| token.kind != SyntaxKind::EndOfFileToken);

    if let Some(next) = next.filter(|next| file.same_line(range.end, next.pos)) {
        return TextEdit::delete(TextRange::new(range.pos, next.pos));
    }

    if file.starts_line(range.pos) {
        let rest = line_rest(&file.text, range.end);
        if !rest.trim().is_empty() {
            // Trailing comment: keep the line, drop the decorator.
            let gap = rest.len() - rest.trim_start().len();
            return TextEdit::delete(TextRange::new(range.pos, range.end + gap as u32));
        }
        let start = preceding_line_break(&file.text, file.line_start(range.pos));
        return TextEdit::delete(TextRange::new(start, range.end));
    }

    let start = file.token_before(range.pos).map_or(range.pos, |token| token.end);
    TextEdit::delete(TextRange::new(start, range.end))
}

/// Text from `pos` up to the end of its line.
fn line_rest(text: &str, pos: u32) -> &str {
    let rest = &text[pos as usize..];
    let end = rest.find(['\n', '\r']).unwrap_or(rest.len());
    &rest[..end]
}

/// Line terminator of the line containing `pos`, `\n` when it has none.
fn line_terminator(text: &str, pos: u32) -> &'static str {
    let rest = &text[pos as usize..];
    match rest.find(['\n', '\r']) {
        Some(end) if rest[end..].starts_with("\r\n") => "\r\n",
        _ => "\n",
    }
}

/// Offset of the line terminator ending the line before `line_start`.
fn preceding_line_break(text: &str, line_start: u32) -> u32 {
    let bytes = text.as_bytes();
    let mut start = line_start as usize;
    if start > 0 && bytes[start - 1] == b'\n' {
        start -= 1;
    }
    if start > 0 && bytes[start - 1] == b'\r' {
        start -= 1;
    }
    start as u32
}

/// Rename the identifier naming a decorator, leaving arguments untouched.
pub fn rename_decorator(decorator: &Decorator, new_name: &str) -> Option<TextEdit> {
    let name = decorator.name()?;
    Some(TextEdit::replace(name.range, new_name))
}

/// Remove the `key` entry from the object literal passed as argument
/// `argument` of `call`.
///
/// When the entry is the only one, the whole (parenthesized) argument goes,
/// with the comma separating it from its neighbours. Otherwise the entry is
/// removed with the comma before it, or the one after it when it is first.
pub fn strip_object_key(
    file: &SourceFile,
    call: &CallExpression,
    argument: usize,
    key: &str,
) -> Option<TextEdit> {
    let expression = call.arguments.get(argument)?;
    let object = expression.as_object()?;
    let (index, entry) = object.property(key)?;

    if object.properties.len() == 1 {
        return Some(TextEdit::delete(remove_argument_range(file, call, argument)?));
    }

    let entry_range = object.properties[index].range();
    debug_assert_eq!(entry_range, entry.range);
    let before = file.token_before(entry_range.pos)?;
    if before.kind == SyntaxKind::CommaToken {
        return Some(TextEdit::delete(TextRange::new(before.pos, entry_range.end)));
    }

    let after = file.token_after(entry_range.end)?;
    if after.kind != SyntaxKind::CommaToken {
        return None;
    }
    let next = file.token_after(after.end)?;
    Some(TextEdit::delete(TextRange::new(entry_range.pos, next.pos)))
}

/// Range covering argument `argument` of `call` plus one separating comma.
fn remove_argument_range(file: &SourceFile, call: &CallExpression, argument: usize) -> Option<TextRange> {
    let range = call.arguments.get(argument)?.range();
    if argument > 0 {
        let comma = file.token_before(range.pos)?;
        if comma.kind != SyntaxKind::CommaToken {
            return None;
        }
        return Some(TextRange::new(comma.pos, range.end));
    }

    match file.token_after(range.end) {
        Some(comma) if comma.kind == SyntaxKind::CommaToken => {
            let next = file.token_after(comma.end)?;
            Some(TextRange::new(range.pos, next.pos))
        }
        _ => Some(range),
    }
}

/// Append `text` as the last argument of `call`.
pub fn append_argument(file: &SourceFile, call: &CallExpression, text: &str) -> Option<TextEdit> {
    let close = file.token_before(call.parens.end)?;
    if close.kind != SyntaxKind::CloseParenToken || close.pos < call.parens.pos {
        return None;
    }
    let text = if call.arguments.is_empty() {
        text.to_string()
    } else if call.trailing_comma {
        format!(" {text},")
    } else {
        format!(", {text}")
    };
    Some(TextEdit::insert(close.pos, text))
}

/// Replace argument `argument` of `call` (parentheses included) with `text`.
pub fn replace_argument(call: &CallExpression, argument: usize, text: &str) -> Option<TextEdit> {
    let range = call.arguments.get(argument)?.range();
    Some(TextEdit::replace(range, text))
}

/// Give a bare decorator (`@Field`) an argument list.
pub fn append_call_arguments(decorator: &Decorator, text: &str) -> TextEdit {
    TextEdit::insert(decorator.range.end, text)
}

/// Rewrite an object argument as `{ <existing entries>, <entry> }`.
pub fn merge_into_object_argument(
    file: &SourceFile,
    call: &CallExpression,
    argument: usize,
    entry: &str,
) -> Option<TextEdit> {
    let object = call.arguments.get(argument)?.as_object()?;
    let inner = object_inner_text(file, object)?;
    let text = if inner.is_empty() {
        format!("{{ {entry} }}")
    } else {
        format!("{{ {inner}, {entry} }}")
    };
    replace_argument(call, argument, &text)
}

/// The entries of an object literal as one line: braces removed, trimmed,
/// trailing comma dropped and whitespace runs outside strings collapsed.
/// `None` for unterminated literals or literals containing comments.
pub fn object_inner_text(file: &SourceFile, object: &ObjectLiteral) -> Option<String> {
    let text = object.range.slice(&file.text);
    let inner = text.strip_prefix('{')?.strip_suffix('}')?;
    let inner = inner.trim();
    let inner = inner.strip_suffix(',').unwrap_or(inner).trim_end();
    collapse_whitespace(inner)
}

fn collapse_whitespace(text: &str) -> Option<String> {
    let mut output = String::with_capacity(text.len());
    let mut quote: Option<char> = None;
    let mut chars = text.chars().peekable();
    let mut pending_space = false;

    while let Some(c) = chars.next() {
        if let Some(open) = quote {
            output.push(c);
            if c == '\\' {
                if let Some(escaped) = chars.next() {
                    output.push(escaped);
                }
            } else if c == open {
                quote = None;
            }
            continue;
        }
        if c.is_whitespace() {
            pending_space = true;
            continue;
        }
        if c == '/' && matches!(chars.peek(), Some('/' | '*')) {
            return None;
        }
        if pending_space {
            output.push(' ');
            pending_space = false;
        }
        if matches!(c, '\'' | '"' | '`') {
            quote = Some(c);
        }
        output.push(c);
    }
    Some(output)
}

/// Add `name` to the named imports of `import`.
pub fn append_import(file: &SourceFile, import: &ImportDeclaration, name: &str) -> Option<TextEdit> {
    let named = import.named_imports.as_ref()?;
    let Some(last) = named.elements.last() else {
        return Some(TextEdit::insert(named.range.pos + 1, format!(" {name} ")));
    };
    if named.trailing_comma {
        let comma = file.token_after(last.range.end)?;
        if comma.kind != SyntaxKind::CommaToken {
            return None;
        }
        return Some(TextEdit::insert(comma.end, format!(" {name},")));
    }
    Some(TextEdit::insert(last.range.end, format!(", {name}")))
}

/// Insert decorator `text` after the property's last decorator: on its own
/// line with the property's indentation when the property head starts a
/// line, inline otherwise.
pub fn append_decorator(file: &SourceFile, property: &PropertyDeclaration, text: &str) -> TextEdit {
    let head = property.head_start();
    if file.starts_line(head) {
        let indentation = file.line_indentation(head);
        let newline = line_terminator(&file.text, head);
        TextEdit::insert(head, format!("{text}{newline}{indentation}"))
    } else {
        TextEdit::insert(head, format!("{text} "))
    }
}
