//! Syntax tree for the parts of a TypeScript file the lint rules read.
//!
//! The tree is owned and positional: every node carries the `TextRange` it
//! was parsed from so fixes can splice the original text. Anything the
//! parser does not model is kept as an opaque range.

use nestlint_common::{LineMap, TextRange};
use nestlint_scanner::Token;
use serde::Serialize;

#[derive(Debug, Clone)]
pub struct SourceFile {
    pub file_name: String,
    pub text: String,
    /// Significant tokens, ending with `EndOfFileToken`.
    pub tokens: Vec<Token>,
    pub line_map: LineMap,
    pub imports: Vec<ImportDeclaration>,
    /// Every class in the file, including nested and class expressions,
    /// in source order.
    pub classes: Vec<ClassDeclaration>,
}

impl SourceFile {
    /// All property declarations of all classes, in source order.
    pub fn properties(&self) -> impl Iterator<Item = &PropertyDeclaration> {
        self.classes.iter().flat_map(|class| class.properties())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportDeclaration {
    pub range: TextRange,
    /// Cooked module specifier, e.g. `class-validator`.
    pub module_specifier: String,
    pub named_imports: Option<NamedImports>,
    pub is_type_only: bool,
    /// Only whitespace precedes the `import` keyword on its line.
    pub starts_line: bool,
}

impl ImportDeclaration {
    pub fn imports_name(&self, imported: &str) -> bool {
        self.named_imports
            .as_ref()
            .is_some_and(|named| named.elements.iter().any(|e| e.imported == imported))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NamedImports {
    /// Braces included.
    pub range: TextRange,
    pub elements: Vec<ImportSpecifier>,
    pub trailing_comma: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportSpecifier {
    pub range: TextRange,
    pub imported: String,
    pub local: String,
    pub is_type_only: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassDeclaration {
    pub range: TextRange,
    pub name: Option<String>,
    pub decorators: Vec<Decorator>,
    pub members: Vec<ClassMember>,
}

impl ClassDeclaration {
    pub fn properties(&self) -> impl Iterator<Item = &PropertyDeclaration> {
        self.members.iter().filter_map(|member| match member {
            ClassMember::Property(property) => Some(property),
            _ => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ClassMember {
    Property(PropertyDeclaration),
    Method(MethodDeclaration),
    /// Index signatures, static blocks, stray semicolons and anything the
    /// parser could not classify.
    Other(TextRange),
}

impl ClassMember {
    pub fn range(&self) -> TextRange {
        match self {
            ClassMember::Property(property) => property.range,
            ClassMember::Method(method) => method.range,
            ClassMember::Other(range) => *range,
        }
    }
}

/// Methods, accessors and constructors.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MethodDeclaration {
    pub range: TextRange,
    pub decorators: Vec<Decorator>,
    pub modifiers: Vec<Modifier>,
    pub name: PropertyName,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDeclaration {
    /// From the first decorator or modifier to the end of the declaration,
    /// including a terminating semicolon.
    pub range: TextRange,
    pub decorators: Vec<Decorator>,
    pub modifiers: Vec<Modifier>,
    pub name: PropertyName,
    pub question_token: Option<TextRange>,
    pub exclamation_token: Option<TextRange>,
    pub type_annotation: Option<TypeNode>,
    pub initializer: Option<Expression>,
}

impl PropertyDeclaration {
    /// Start of the first token after the decorators: a modifier or the name.
    pub fn head_start(&self) -> u32 {
        self.modifiers
            .first()
            .map_or(self.name.range.pos, |modifier| modifier.range.pos)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Modifier {
    pub kind: nestlint_scanner::SyntaxKind,
    pub range: TextRange,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PropertyNameKind {
    Identifier,
    PrivateIdentifier,
    StringLiteral,
    NumericLiteral,
    Computed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PropertyName {
    /// Identifier text, cooked string value, number text, or the raw
    /// bracketed text of a computed name.
    pub text: String,
    pub range: TextRange,
    pub kind: PropertyNameKind,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Decorator {
    /// `@` included.
    pub range: TextRange,
    pub expression: Expression,
}

impl Decorator {
    /// The call expression when the decorator is `@name(...)`.
    pub fn call(&self) -> Option<&CallExpression> {
        match &self.expression {
            Expression::Call(call) => Some(call),
            _ => None,
        }
    }

    /// Bare identifier callee of a decorator call.
    pub fn callee_name(&self) -> Option<&Identifier> {
        match self.call()?.callee.as_ref() {
            Expression::Identifier(identifier) => Some(identifier),
            _ => None,
        }
    }

    /// Identifier naming the decorator: the callee of `@name(...)` or the
    /// whole expression of `@name`.
    pub fn name(&self) -> Option<&Identifier> {
        match &self.expression {
            Expression::Identifier(identifier) => Some(identifier),
            _ => self.callee_name(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Identifier {
    pub range: TextRange,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Expression {
    Identifier(Identifier),
    Call(CallExpression),
    PropertyAccess(PropertyAccessExpression),
    Object(ObjectLiteral),
    Literal(Literal),
    Parenthesized(ParenthesizedExpression),
    /// An expression the rules never look into.
    Other(TextRange),
}

impl Expression {
    pub fn range(&self) -> TextRange {
        match self {
            Expression::Identifier(identifier) => identifier.range,
            Expression::Call(call) => call.range,
            Expression::PropertyAccess(access) => access.range,
            Expression::Object(object) => object.range,
            Expression::Literal(literal) => literal.range,
            Expression::Parenthesized(parenthesized) => parenthesized.range,
            Expression::Other(range) => *range,
        }
    }

    /// Strip any number of enclosing parentheses.
    pub fn skip_parentheses(&self) -> &Expression {
        let mut expression = self;
        while let Expression::Parenthesized(parenthesized) = expression {
            expression = &parenthesized.expression;
        }
        expression
    }

    /// The object literal, looking through parentheses.
    pub fn as_object(&self) -> Option<&ObjectLiteral> {
        match self.skip_parentheses() {
            Expression::Object(object) => Some(object),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CallExpression {
    pub range: TextRange,
    pub callee: Box<Expression>,
    pub arguments: Vec<Expression>,
    /// Argument list including both parentheses.
    pub parens: TextRange,
    pub trailing_comma: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertyAccessExpression {
    pub range: TextRange,
    pub expression: Box<Expression>,
    pub name: Identifier,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParenthesizedExpression {
    pub range: TextRange,
    pub expression: Box<Expression>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum LiteralKind {
    True,
    False,
    Null,
    String(String),
    Number(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Literal {
    pub range: TextRange,
    pub kind: LiteralKind,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObjectLiteral {
    /// Braces included, parentheses excluded.
    pub range: TextRange,
    pub properties: Vec<ObjectProperty>,
    pub trailing_comma: bool,
}

impl ObjectLiteral {
    /// First `key: value` entry whose key is `name`.
    pub fn property(&self, name: &str) -> Option<(usize, &PropertyAssignment)> {
        self.properties
            .iter()
            .enumerate()
            .find_map(|(index, property)| match property {
                ObjectProperty::Property(assignment) if assignment.key.text == name => {
                    Some((index, assignment))
                }
                _ => None,
            })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ObjectProperty {
    Property(PropertyAssignment),
    Shorthand(Identifier),
    Spread { range: TextRange, expression: Expression },
    Method { range: TextRange, name: Option<PropertyName> },
}

impl ObjectProperty {
    pub fn range(&self) -> TextRange {
        match self {
            ObjectProperty::Property(assignment) => assignment.range,
            ObjectProperty::Shorthand(identifier) => identifier.range,
            ObjectProperty::Spread { range, .. } | ObjectProperty::Method { range, .. } => *range,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertyAssignment {
    pub range: TextRange,
    pub key: PropertyName,
    pub value: Expression,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum KeywordType {
    Undefined,
    Null,
    Void,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum TypeNode {
    Union {
        range: TextRange,
        types: Vec<TypeNode>,
    },
    Keyword {
        range: TextRange,
        keyword: KeywordType,
    },
    Parenthesized {
        range: TextRange,
        inner: Box<TypeNode>,
    },
    /// References, literals, functions, object types: opaque to the rules.
    Other(TextRange),
}

impl TypeNode {
    pub fn range(&self) -> TextRange {
        match self {
            TypeNode::Union { range, .. }
            | TypeNode::Keyword { range, .. }
            | TypeNode::Parenthesized { range, .. } => *range,
            TypeNode::Other(range) => *range,
        }
    }

    /// Members of the top-level union with parentheses flattened, so that
    /// `(string | undefined) | number` yields three members.
    pub fn flattened_union_members(&self) -> Vec<&TypeNode> {
        let mut members = Vec::new();
        flatten_into(self, &mut members);
        members
    }
}

fn flatten_into<'a>(node: &'a TypeNode, out: &mut Vec<&'a TypeNode>) {
    match node {
        TypeNode::Union { types, .. } => {
            for member in types {
                flatten_into(member, out);
            }
        }
        TypeNode::Parenthesized { inner, .. } => flatten_into(inner, out),
        _ => out.push(node),
    }
}
