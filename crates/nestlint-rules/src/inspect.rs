//! Read-only queries over property declarations and their decorators.

use crate::vocabulary::is_class_validator_decorator;
use nestlint_parser::{
    CallExpression, Decorator, Expression, KeywordType, Literal, LiteralKind, ObjectLiteral,
    PropertyAssignment, PropertyDeclaration, TypeNode,
};

/// Look up decorators by name, returning them in the order of `names`.
/// Absent names are `None`; the first occurrence of a name wins.
pub fn decorators_named_ordered<'a, const N: usize>(
    property: &'a PropertyDeclaration,
    names: [&str; N],
) -> [Option<&'a Decorator>; N] {
    names.map(|name| {
        property
            .decorators
            .iter()
            .find(|decorator| decorator.name().is_some_and(|id| id.text == name))
    })
}

/// Type-level optionality: a `?` marker, or `undefined`/`null` in the
/// top-level union. A `!` marker never makes a property optional.
pub fn is_optional_property(property: &PropertyDeclaration) -> bool {
    property.question_token.is_some()
        || property.type_annotation.as_ref().is_some_and(|annotation| {
            annotation.flattened_union_members().iter().any(|member| {
                matches!(
                    member,
                    TypeNode::Keyword {
                        keyword: KeywordType::Undefined | KeywordType::Null,
                        ..
                    }
                )
            })
        })
}

/// Whether the object has a `key: <expected>` entry with a boolean literal
/// value.
pub fn property_value_equals(object: &ObjectLiteral, key: &str, expected: bool) -> bool {
    object
        .property(key)
        .is_some_and(|(_, assignment)| boolean_value(assignment) == Some(expected))
}

fn boolean_value(assignment: &PropertyAssignment) -> Option<bool> {
    match assignment.value.skip_parentheses() {
        Expression::Literal(Literal {
            kind: LiteralKind::True,
            ..
        }) => Some(true),
        Expression::Literal(Literal {
            kind: LiteralKind::False,
            ..
        }) => Some(false),
        _ => None,
    }
}

/// The `key` entry of `object` unless its value is literally `true`.
pub fn entry_not_true<'a>(object: &'a ObjectLiteral, key: &str) -> Option<&'a PropertyAssignment> {
    object
        .property(key)
        .map(|(_, assignment)| assignment)
        .filter(|assignment| boolean_value(assignment) != Some(true))
}

/// Object-literal arguments of a call with their argument index.
pub fn object_arguments(call: &CallExpression) -> impl Iterator<Item = (usize, &ObjectLiteral)> {
    call.arguments
        .iter()
        .enumerate()
        .filter_map(|(index, argument)| argument.as_object().map(|object| (index, object)))
}

/// The first argument when it is an object literal.
pub fn first_argument_object(call: &CallExpression) -> Option<&ObjectLiteral> {
    call.arguments.first().and_then(Expression::as_object)
}

/// A call to an identifier from the `class-validator` vocabulary.
pub fn is_validation_decorator(decorator: &Decorator) -> bool {
    decorator
        .callee_name()
        .is_some_and(|callee| is_class_validator_decorator(&callee.text))
}
