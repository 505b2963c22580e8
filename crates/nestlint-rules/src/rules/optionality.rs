//! `api-property-matches-property-optionality`
//!
//! The type annotation is the ground truth: a property is optional when it
//! carries `?` or its top-level union includes `undefined` or `null`. The
//! documentation decorator (`@ApiProperty` / `@ApiPropertyOptional`), the
//! GraphQL `@Field({ nullable })` option and `@IsOptional` are checked
//! against it, never the other way round.
//!
//! Fixes are planned against the tree of the current pass only. A property
//! needing several fixes converges over successive passes of the linter.

use crate::inspect::{
    decorators_named_ordered, entry_not_true, first_argument_object, is_optional_property,
    is_validation_decorator, object_arguments, property_value_equals,
};
use crate::patch::{PatchPlan, PatchStep};
use crate::rule::{Finding, LintContext, LintRule, MessageId, RuleMeta, Severity};
use crate::vocabulary::IS_OPTIONAL;
use nestlint_parser::{Decorator, ImportDeclaration, PropertyDeclaration, SourceFile};
use serde::Deserialize;
use tracing::trace;

pub const RULE_NAME: &str = "api-property-matches-property-optionality";

const FIELD: &str = "Field";
const API_PROPERTY: &str = "ApiProperty";
const API_PROPERTY_OPTIONAL: &str = "ApiPropertyOptional";
const NULLABLE: &str = "nullable";
const REQUIRED: &str = "required";
const CLASS_VALIDATOR: &str = "class-validator";

static META: RuleMeta = RuleMeta {
    name: RULE_NAME,
    description: "Properties should have correct nullable decorators",
    default_severity: Severity::Error,
    fixable: true,
    messages: &[
        MessageId::ShouldUseOptionalDecorator,
        MessageId::ShouldSetFieldAsNullable,
        MessageId::ShouldAddIsOptional,
        MessageId::ShouldUseRequiredDecorator,
        MessageId::ShouldRemoveNullableFromField,
        MessageId::ConflictingApiPropertyDecorators,
    ],
};

/// Rule options, e.g. `["error", { "disableField": true }]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct OptionalityOptions {
    /// Skip the `@Field` nullability checks.
    #[serde(alias = "shouldDisableField")]
    pub disable_field: bool,
}

#[derive(Debug, Default)]
pub struct OptionalityRule {
    options: OptionalityOptions,
}

/// The decorators the rule looks at, by name.
#[derive(Clone, Copy)]
struct Decorators<'a> {
    field: Option<&'a Decorator>,
    api_property_optional: Option<&'a Decorator>,
    is_optional: Option<&'a Decorator>,
    api_property: Option<&'a Decorator>,
}

impl<'a> Decorators<'a> {
    fn of(property: &'a PropertyDeclaration) -> Self {
        let [field, api_property_optional, is_optional, api_property] = decorators_named_ordered(
            property,
            [FIELD, API_PROPERTY_OPTIONAL, IS_OPTIONAL, API_PROPERTY],
        );
        Decorators {
            field,
            api_property_optional,
            is_optional,
            api_property,
        }
    }

    /// The later of `@ApiProperty` and `@ApiPropertyOptional` when both are
    /// present.
    fn conflicting_documentation(&self) -> Option<&'a Decorator> {
        let (Some(required), Some(optional)) = (self.api_property, self.api_property_optional)
        else {
            return None;
        };
        Some(if required.range.pos > optional.range.pos {
            required
        } else {
            optional
        })
    }
}

impl OptionalityRule {
    pub fn new(options: OptionalityOptions) -> Self {
        OptionalityRule { options }
    }

    /// Build the rule from the JSON options of a config entry.
    pub fn from_options(options: Option<&serde_json::Value>) -> Result<Self, serde_json::Error> {
        let options = match options {
            Some(value) => OptionalityOptions::deserialize(value)?,
            None => OptionalityOptions::default(),
        };
        Ok(OptionalityRule::new(options))
    }

    pub fn options(&self) -> OptionalityOptions {
        self.options
    }

    fn field<'a>(&self, decorators: &Decorators<'a>) -> Option<&'a Decorator> {
        decorators.field.filter(|_| !self.options.disable_field)
    }

    fn check_optional<'a>(
        &self,
        property: &'a PropertyDeclaration,
        decorators: &Decorators<'a>,
        conflict: bool,
        ctx: &LintContext<'a>,
        findings: &mut Vec<Finding<'a>>,
    ) {
        if let Some(field) = self.field(decorators) {
            if field_set_as_required(field) {
                findings.push(
                    Finding::new(MessageId::ShouldSetFieldAsNullable, field.range)
                        .with_fix(nullable_field_plan(field)),
                );
            }
        }

        if decorators.is_optional.is_none() && property.decorators.iter().any(is_validation_decorator)
        {
            findings.push(
                Finding::new(MessageId::ShouldAddIsOptional, property.range)
                    .with_fix(Some(add_is_optional_plan(property, ctx.file))),
            );
        }

        if let Some(api_property) = decorators.api_property.filter(|_| !conflict) {
            let mut plan = PatchPlan::new();
            if let Some(call) = api_property.call() {
                if has_required_false(api_property) {
                    plan.push(PatchStep::StripObjectKey {
                        call,
                        argument: 0,
                        key: REQUIRED,
                    });
                }
            }
            plan.push(PatchStep::RenameDecorator {
                decorator: api_property,
                to: API_PROPERTY_OPTIONAL,
            });
            findings.push(
                Finding::new(MessageId::ShouldUseOptionalDecorator, api_property.range)
                    .with_fix(Some(plan)),
            );
        }
    }

    fn check_required<'a>(
        &self,
        property: &'a PropertyDeclaration,
        decorators: &Decorators<'a>,
        conflict: bool,
        findings: &mut Vec<Finding<'a>>,
    ) {
        if let Some(field) = self.field(decorators) {
            if let Some(call) = field.call() {
                let nullable_true = object_arguments(call)
                    .next()
                    .filter(|(_, object)| property_value_equals(object, NULLABLE, true));
                if let Some((argument, _)) = nullable_true {
                    let mut plan = PatchPlan::new();
                    plan.push(PatchStep::StripObjectKey {
                        call,
                        argument,
                        key: NULLABLE,
                    });
                    findings.push(
                        Finding::new(MessageId::ShouldRemoveNullableFromField, field.range)
                            .with_fix(Some(plan)),
                    );
                }
            }
        }

        // With both documentation decorators present only `@IsOptional` is
        // handled here.
        let api_property_optional = decorators.api_property_optional.filter(|_| !conflict);
        let required_false = decorators
            .api_property
            .filter(|decorator| !conflict && has_required_false(decorator));
        if api_property_optional.is_none()
            && decorators.is_optional.is_none()
            && required_false.is_none()
        {
            return;
        }

        let mut plan = PatchPlan::new();
        if let Some(is_optional) = decorators.is_optional {
            plan.push(PatchStep::RemoveDecorator(is_optional));
        }
        if let Some(call) = required_false.and_then(Decorator::call) {
            plan.push(PatchStep::StripObjectKey {
                call,
                argument: 0,
                key: REQUIRED,
            });
        }
        if let Some(decorator) = api_property_optional {
            plan.push(PatchStep::RenameDecorator {
                decorator,
                to: API_PROPERTY,
            });
        }
        findings.push(
            Finding::new(MessageId::ShouldUseRequiredDecorator, property.range)
                .with_fix(Some(plan)),
        );
    }
}

impl LintRule for OptionalityRule {
    fn meta(&self) -> &RuleMeta {
        &META
    }

    fn check_property<'a>(
        &self,
        property: &'a PropertyDeclaration,
        ctx: &LintContext<'a>,
    ) -> Vec<Finding<'a>> {
        let decorators = Decorators::of(property);
        let conflicting = decorators.conflicting_documentation();
        let mut findings = Vec::new();

        let optional = is_optional_property(property);
        if optional {
            self.check_optional(property, &decorators, conflicting.is_some(), ctx, &mut findings);
        } else {
            self.check_required(property, &decorators, conflicting.is_some(), &mut findings);
        }

        if let Some(later) = conflicting {
            findings.push(
                Finding::new(MessageId::ConflictingApiPropertyDecorators, later.range)
                    .with_args(&[API_PROPERTY, API_PROPERTY_OPTIONAL]),
            );
        }

        if !findings.is_empty() {
            trace!(
                property = %property.name.text,
                optional,
                findings = findings.len(),
                "optionality mismatch"
            );
        }
        findings
    }
}

/// `@Field` lacks `nullable: true`, or says `nullable: false` somewhere.
fn field_set_as_required(field: &Decorator) -> bool {
    let Some(call) = field.call() else {
        return true;
    };
    let has_nullable_true =
        object_arguments(call).any(|(_, object)| property_value_equals(object, NULLABLE, true));
    let has_nullable_false =
        object_arguments(call).any(|(_, object)| property_value_equals(object, NULLABLE, false));
    !has_nullable_true || has_nullable_false
}

fn has_required_false(api_property: &Decorator) -> bool {
    api_property
        .call()
        .and_then(first_argument_object)
        .is_some_and(|object| property_value_equals(object, REQUIRED, false))
}

/// Make `@Field` nullable. `None` when the argument shape is not one of
/// `()`, `(thunk)`, `(options)` or `(thunk, options)`.
fn nullable_field_plan(field: &Decorator) -> Option<PatchPlan<'_>> {
    let step = match field.call() {
        None => PatchStep::AppendCallArguments {
            decorator: field,
            text: "({ nullable: true })",
        },
        Some(call) => {
            if let Some(entry) =
                object_arguments(call).find_map(|(_, object)| entry_not_true(object, NULLABLE))
            {
                PatchStep::SetObjectValue {
                    entry,
                    text: "true",
                }
            } else {
                match call.arguments.as_slice() {
                    [] => PatchStep::AppendArgument {
                        call,
                        text: "{ nullable: true }",
                    },
                    [only] if only.as_object().is_some() => PatchStep::MergeIntoObjectArgument {
                        call,
                        argument: 0,
                        entry: "nullable: true",
                    },
                    [_] => PatchStep::AppendArgument {
                        call,
                        text: "{ nullable: true }",
                    },
                    [_, second] if second.as_object().is_some() => {
                        PatchStep::MergeIntoObjectArgument {
                            call,
                            argument: 1,
                            entry: "nullable: true",
                        }
                    }
                    _ => return None,
                }
            }
        }
    };
    let mut plan = PatchPlan::new();
    plan.push(step);
    Some(plan)
}

/// Insert `@IsOptional()`, importing it from the first `class-validator`
/// import that starts a line when it is not imported yet.
fn add_is_optional_plan<'a>(property: &'a PropertyDeclaration, file: &'a SourceFile) -> PatchPlan<'a> {
    let mut plan = PatchPlan::new();
    let already_imported = file
        .imports
        .iter()
        .any(|import| import.module_specifier == CLASS_VALIDATOR && import.imports_name(IS_OPTIONAL));
    if !already_imported {
        if let Some(import) = class_validator_import(file) {
            plan.push(PatchStep::AppendImport {
                import,
                name: IS_OPTIONAL,
            });
        }
    }
    plan.push(PatchStep::AppendDecorator {
        property,
        text: "@IsOptional()",
    });
    plan
}

fn class_validator_import(file: &SourceFile) -> Option<&ImportDeclaration> {
    file.imports
        .iter()
        .find(|import| {
            import.module_specifier == CLASS_VALIDATOR
                && file.line_start(import.range.pos) == import.range.pos
        })
        .filter(|import| !import.is_type_only && import.named_imports.is_some())
}
