//! Patch plans: the structural description of a fix, assembled into text
//! edits only when a fix is requested.

use crate::edits;
use crate::fixer::{TextEdit, is_disjoint};
use nestlint_parser::{
    CallExpression, Decorator, ImportDeclaration, PropertyAssignment, PropertyDeclaration,
    SourceFile,
};
use tracing::trace;

/// One structural change of a fix.
#[derive(Debug, Clone, Copy)]
pub enum PatchStep<'a> {
    /// Remove a decorator together with its line or trailing whitespace.
    RemoveDecorator(&'a Decorator),
    /// Rename a decorator's identifier.
    RenameDecorator {
        decorator: &'a Decorator,
        to: &'static str,
    },
    /// Remove `key` from the object literal at argument `argument`.
    StripObjectKey {
        call: &'a CallExpression,
        argument: usize,
        key: &'static str,
    },
    /// Replace the value of an existing object entry.
    SetObjectValue {
        entry: &'a PropertyAssignment,
        text: &'static str,
    },
    /// Append a new last argument.
    AppendArgument {
        call: &'a CallExpression,
        text: &'static str,
    },
    /// Rewrite the object literal at argument `argument` with one more entry.
    MergeIntoObjectArgument {
        call: &'a CallExpression,
        argument: usize,
        entry: &'static str,
    },
    /// Turn a bare decorator into a call with the given argument list.
    AppendCallArguments {
        decorator: &'a Decorator,
        text: &'static str,
    },
    /// Add a named import specifier.
    AppendImport {
        import: &'a ImportDeclaration,
        name: &'static str,
    },
    /// Add a decorator after the property's existing decorators.
    AppendDecorator {
        property: &'a PropertyDeclaration,
        text: &'static str,
    },
}

impl PatchStep<'_> {
    fn assemble(&self, file: &SourceFile) -> Option<TextEdit> {
        match *self {
            PatchStep::RemoveDecorator(decorator) => Some(edits::remove_decorator(file, decorator)),
            PatchStep::RenameDecorator { decorator, to } => edits::rename_decorator(decorator, to),
            PatchStep::StripObjectKey {
                call,
                argument,
                key,
            } => edits::strip_object_key(file, call, argument, key),
            PatchStep::SetObjectValue { entry, text } => {
                Some(TextEdit::replace(entry.value.range(), text))
            }
            PatchStep::AppendArgument { call, text } => edits::append_argument(file, call, text),
            PatchStep::MergeIntoObjectArgument {
                call,
                argument,
                entry,
            } => edits::merge_into_object_argument(file, call, argument, entry),
            PatchStep::AppendCallArguments { decorator, text } => {
                Some(edits::append_call_arguments(decorator, text))
            }
            PatchStep::AppendImport { import, name } => edits::append_import(file, import, name),
            PatchStep::AppendDecorator { property, text } => {
                Some(edits::append_decorator(file, property, text))
            }
        }
    }
}

/// The ordered steps of one fix. All of them are committed together.
#[derive(Debug, Clone, Default)]
pub struct PatchPlan<'a> {
    pub steps: Vec<PatchStep<'a>>,
}

impl<'a> PatchPlan<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, step: PatchStep<'a>) {
        self.steps.push(step);
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// The plan as text edits against `file`. `None` when a step cannot be
    /// realized or two steps would touch the same text.
    pub fn assemble(&self, file: &SourceFile) -> Option<Vec<TextEdit>> {
        let mut edits = Vec::with_capacity(self.steps.len());
        for step in &self.steps {
            let Some(edit) = step.assemble(file) else {
                trace!(?step, "patch step not applicable");
                return None;
            };
            edits.push(edit);
        }
        if !is_disjoint(&edits) {
            trace!(edits = edits.len(), "patch steps overlap");
            return None;
        }
        Some(edits)
    }
}
