//! Host glue emission
//!
//! One [`ClassEmitter`] renders one class for one host, then dies.
//! The lifecycle is uninitialized, initialized, rendered, in that
//! order; every transition out of order is an [`EmitError`] and means
//! the pipeline drove the emitter wrong. Dropping the emitter is the
//! teardown step and is safe from any state, including one that was
//! never initialized.

mod script;

pub use script::ScriptBackend;

use crate::error::EmitError;
use crate::spec::{BindingSpec, Directive};
use ferrule_model::ClassView;

/// Rendering contract every host backend implements.
///
/// Backends are stateless: all per-class data arrives through the view
/// and the spec, so rendering the same pair twice yields identical
/// text.
pub trait HostBackend {
    /// Stable backend name, used in diagnostics.
    fn name(&self) -> &'static str;

    /// Render the glue source for one class.
    fn render(&self, view: ClassView<'_>, spec: &BindingSpec) -> String;
}

struct EmitUnit<'g> {
    view: ClassView<'g>,
    spec: BindingSpec,
}

/// Single-use glue emitter for one (class, host) pair.
pub struct ClassEmitter<'g> {
    unit: Option<EmitUnit<'g>>,
    rendered: bool,
}

impl<'g> ClassEmitter<'g> {
    /// Create an uninitialized emitter.
    pub fn new() -> Self {
        ClassEmitter {
            unit: None,
            rendered: false,
        }
    }

    /// Bind the emitter to one class and its derived spec.
    ///
    /// Fails with [`EmitError::AlreadyInitialized`] whenever the
    /// emitter already holds a class, rendered or not, and with
    /// [`EmitError::InvalidSpec`] when the spec does not belong to the
    /// viewed class.
    pub fn init(&mut self, view: ClassView<'g>, spec: &BindingSpec) -> Result<(), EmitError> {
        if let Some(unit) = &self.unit {
            return Err(EmitError::AlreadyInitialized {
                class: unit.spec.class_name.clone(),
            });
        }

        validate_spec(view, spec)?;
        self.unit = Some(EmitUnit {
            view,
            spec: spec.clone(),
        });
        Ok(())
    }

    /// Render the glue source once.
    ///
    /// Deterministic over the (class, spec) pair the emitter was
    /// initialized with. Fails with [`EmitError::Uninitialized`]
    /// before `init` and [`EmitError::AlreadyRendered`] afterwards.
    pub fn render(&mut self) -> Result<String, EmitError> {
        let unit = self.unit.as_ref().ok_or(EmitError::Uninitialized)?;
        if self.rendered {
            return Err(EmitError::AlreadyRendered {
                class: unit.spec.class_name.clone(),
            });
        }
        self.rendered = true;
        Ok(unit.spec.kind.backend().render(unit.view, &unit.spec))
    }
}

impl Default for ClassEmitter<'_> {
    fn default() -> Self {
        Self::new()
    }
}

/// Check that `spec` belongs to the viewed class.
///
/// Every member a directive names must exist on the class or an
/// ancestor; inherited members count as present.
fn validate_spec(view: ClassView<'_>, spec: &BindingSpec) -> Result<(), EmitError> {
    if spec.class_name != view.name() {
        return Err(EmitError::InvalidSpec {
            class: view.name().to_string(),
            detail: format!("spec was derived for class {}", spec.class_name),
        });
    }

    for directive in &spec.directives {
        match directive {
            Directive::Accessor { field, .. } => {
                if view.find_field(field).is_none() {
                    return Err(EmitError::InvalidSpec {
                        class: view.name().to_string(),
                        detail: format!("spec binds unknown field `{field}`"),
                    });
                }
            }
            Directive::Method { method, params, .. } => {
                if view.find_method(method, params.len()).is_none() {
                    return Err(EmitError::InvalidSpec {
                        class: view.name().to_string(),
                        detail: format!(
                            "spec binds unknown method `{method}` with {} parameter(s)",
                            params.len()
                        ),
                    });
                }
            }
            Directive::Constructor { .. } | Directive::Destructor { .. } => {}
        }
    }

    Ok(())
}
