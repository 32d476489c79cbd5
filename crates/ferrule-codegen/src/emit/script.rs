//! Generic registration-script backend
//!
//! Emits one registration call per directive against a small host-side
//! API: `bind_class`, `bind_ctor`, `bind_dtor`, `bind_reader`,
//! `bind_writer`, `bind_method`. The output is plain text assembled
//! line by line; nothing here can fail.

use crate::emit::HostBackend;
use crate::spec::{BindingSpec, Directive, FieldArg};
use ferrule_model::{ClassView, ParamDecl};
use std::fmt::Write;

/// The built-in backend for generic dynamic scripting hosts.
#[derive(Debug, Default, Clone, Copy)]
pub struct ScriptBackend;

impl HostBackend for ScriptBackend {
    fn name(&self) -> &'static str {
        "script"
    }

    fn render(&self, view: ClassView<'_>, spec: &BindingSpec) -> String {
        let mut out = String::new();
        let cp = spec.syntax.comment_prefix.as_str();
        let class = spec.class_name.as_str();
        let rule = "=".repeat(64);

        writeln!(out, "{cp} {rule}").unwrap();
        writeln!(out, "{cp} Bindings for {class} (host: {})", spec.host).unwrap();
        writeln!(out, "{cp} Generated by ferrule. Do not edit.").unwrap();
        writeln!(out, "{cp} {rule}").unwrap();
        writeln!(out).unwrap();

        write_doc(&mut out, cp, &spec.class_doc);
        match view.parent_name() {
            Some(parent) => writeln!(out, "bind_class \"{class}\", parent: \"{parent}\"").unwrap(),
            None => writeln!(out, "bind_class \"{class}\"").unwrap(),
        }

        for directive in &spec.directives {
            writeln!(out).unwrap();
            match directive {
                Directive::Constructor { name, params } => {
                    writeln!(
                        out,
                        "bind_ctor \"{class}\", name: \"{name}\", args: [{}]",
                        render_field_args(params)
                    )
                    .unwrap();
                }
                Directive::Destructor { name } => {
                    writeln!(out, "bind_dtor \"{class}\", name: \"{name}\"").unwrap();
                }
                Directive::Accessor {
                    field,
                    reader,
                    writer,
                    ty,
                    doc,
                } => {
                    write_doc(&mut out, cp, doc);
                    writeln!(
                        out,
                        "bind_reader \"{class}\", field: \"{field}\", as: \"{reader}\", type: {ty}"
                    )
                    .unwrap();
                    writeln!(
                        out,
                        "bind_writer \"{class}\", field: \"{field}\", as: \"{writer}\", type: {ty}"
                    )
                    .unwrap();
                }
                Directive::Method {
                    method,
                    alias,
                    params,
                    returns,
                    implemented_in,
                    expand_defaults,
                    doc,
                } => {
                    write_doc(&mut out, cp, doc);
                    writeln!(
                        out,
                        "bind_method \"{class}\", name: \"{method}\", as: \"{alias}\", \
                         args: [{}], returns: {returns}, via: \"{implemented_in}\"",
                        render_params(params, *expand_defaults)
                    )
                    .unwrap();
                }
            }
        }

        out
    }
}

/// Constructor arguments: every field arrives as an optional keyword.
fn render_field_args(params: &[FieldArg]) -> String {
    params
        .iter()
        .map(|arg| format!("{}: {} = nil", arg.name, arg.ty))
        .collect::<Vec<_>>()
        .join(", ")
}

fn render_params(params: &[ParamDecl], expand_defaults: bool) -> String {
    params
        .iter()
        .map(|param| match (&param.default, expand_defaults) {
            (Some(value), true) => format!("{}: {} = {}", param.name, param.ty, value),
            _ => format!("{}: {}", param.name, param.ty),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn write_doc(out: &mut String, cp: &str, doc: &Option<String>) {
    if let Some(text) = doc {
        for line in text.lines() {
            writeln!(out, "{cp} {line}").unwrap();
        }
    }
}
