//! Canonical rendering of a syntax tree
//!
//! Every definition and statement is terminated by `;` and every nesting
//! level is indented by four spaces. Comments are not rendered. Parsing the
//! output gives a tree of the same shape, so rendering is a fixed point.

use crate::ast::*;
use crate::stack::ensure_sufficient_stack;

const INDENT: &str = "    ";

pub fn render(file: &SourceFile) -> String {
    let mut printer = Printer::default();
    match &file.root {
        SourceRoot::Definitions(definitions) => {
            for definition in definitions {
                printer.definition(definition);
                printer.push(";\n");
            }
        }
        SourceRoot::Expression(expr) => {
            printer.expression(expr);
            printer.push("\n");
        }
    }
    printer.out
}

pub fn render_expression(expr: &Expression) -> String {
    let mut printer = Printer::default();
    printer.expression(expr);
    printer.out
}

pub fn render_statement(stmt: &Statement) -> String {
    let mut printer = Printer::default();
    printer.statement(stmt);
    printer.out
}

#[derive(Default)]
struct Printer {
    out: String,
    indent: usize,
}

impl Printer {
    fn push(&mut self, text: &str) {
        self.out.push_str(text);
    }

    fn line(&mut self) {
        self.out.push('\n');
        for _ in 0..self.indent {
            self.out.push_str(INDENT);
        }
    }

    /// Render into a separate buffer at the current indentation
    fn capture(&self, f: impl FnOnce(&mut Printer)) -> String {
        let mut inner = Printer {
            out: String::new(),
            indent: self.indent,
        };
        f(&mut inner);
        inner.out
    }

    fn join<T>(&mut self, items: &[T], separator: &str, mut f: impl FnMut(&mut Self, &T)) {
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                self.push(separator);
            }
            f(self, item);
        }
    }

    /// `{` items, one per line and each followed by `;`, `}`
    fn braced<T>(&mut self, items: &[T], mut f: impl FnMut(&mut Self, &T)) {
        if items.is_empty() {
            self.push("{}");
            return;
        }
        self.push("{");
        self.indent += 1;
        for item in items {
            self.line();
            f(self, item);
            self.push(";");
        }
        self.indent -= 1;
        self.line();
        self.push("}");
    }

    // ==================== definitions ====================

    fn definition(&mut self, definition: &Definition) {
        ensure_sufficient_stack(|| self.definition_inner(definition))
    }

    fn definition_inner(&mut self, definition: &Definition) {
        match definition {
            Definition::Module(d) => {
                self.push("module ");
                self.parameterized_name(&d.name);
                if let Some(language) = &d.language {
                    self.push(" language ");
                    self.push(&language.join(", "));
                }
                self.push(" ");
                self.definition_body(&d.definitions);
                self.attributes(&d.attributes);
            }
            Definition::Group(d) => {
                self.visibility(&d.visibility);
                self.push("group ");
                self.parameterized_name(&d.name);
                self.push(" ");
                self.definition_body(&d.definitions);
                self.attributes(&d.attributes);
            }
            Definition::Function(d) => {
                self.visibility(&d.visibility);
                self.push("function");
                self.modifiers(&d.modifiers);
                self.push(" ");
                self.parameterized_name(&d.name);
                self.parameters(&d.parameters);
                self.extends(&d.extends);
                self.execution_context(&d.context);
                self.return_type(&d.return_type);
                self.exception(&d.exception);
                self.optional_block(&d.body);
                self.attributes(&d.attributes);
            }
            Definition::ExternalFunction(d) => {
                self.visibility(&d.visibility);
                self.push("external function");
                self.modifiers(&d.modifiers);
                self.push(" ");
                self.parameterized_name(&d.name);
                self.parameters(&d.parameters);
                self.extends(&d.extends);
                self.return_type(&d.return_type);
                self.exception(&d.exception);
                self.attributes(&d.attributes);
            }
            Definition::Altstep(d) => {
                self.visibility(&d.visibility);
                self.push("altstep");
                self.modifiers(&d.modifiers);
                if d.interleave {
                    self.push(" interleave");
                }
                self.push(" ");
                self.parameterized_name(&d.name);
                self.parameters(&d.parameters);
                self.execution_context(&d.context);
                self.exception(&d.exception);
                if let Some(body) = &d.body {
                    self.push(" ");
                    self.alt_block(body);
                }
                self.attributes(&d.attributes);
            }
            Definition::Testcase(d) => {
                self.visibility(&d.visibility);
                self.push("testcase ");
                self.parameterized_name(&d.name);
                self.parameters(&d.parameters);
                match &d.runs {
                    Some(TestcaseRuns::ExecuteOn(config)) => {
                        self.push(" execute on ");
                        self.reference(config);
                    }
                    Some(TestcaseRuns::RunsOn { component, system }) => {
                        self.runs_on_system(component, system);
                    }
                    None => {}
                }
                self.optional_block(&d.body);
                self.attributes(&d.attributes);
            }
            Definition::Configuration(d) => {
                self.visibility(&d.visibility);
                self.push("configuration ");
                self.parameterized_name(&d.name);
                self.parameters(&d.parameters);
                self.runs_on_system(&d.runs_on, &d.system);
                self.optional_block(&d.body);
                self.attributes(&d.attributes);
            }
            Definition::Control(d) => {
                self.visibility(&d.visibility);
                self.push("control ");
                self.block(&d.body);
                self.attributes(&d.attributes);
            }
            Definition::AltstepType(d) => {
                self.visibility(&d.visibility);
                self.push("type altstep ");
                self.parameterized_name(&d.name);
                self.parameters(&d.parameters);
                self.execution_context(&d.context);
                self.attributes(&d.attributes);
            }
            Definition::TestcaseType(d) => {
                self.visibility(&d.visibility);
                self.push("type testcase ");
                self.parameterized_name(&d.name);
                self.parameters(&d.parameters);
                self.runs_on_system(&d.runs_on, &d.system);
                self.attributes(&d.attributes);
            }
            Definition::FunctionType(d) => {
                self.visibility(&d.visibility);
                self.push("type function ");
                self.parameterized_name(&d.name);
                self.parameters(&d.parameters);
                self.extends(&d.extends);
                self.execution_context(&d.context);
                self.return_type(&d.return_type);
                self.attributes(&d.attributes);
            }
            Definition::Class(d) => {
                self.visibility(&d.visibility);
                self.push(if d.external { "type external class" } else { "type class" });
                self.modifiers(&d.modifiers);
                self.push(" ");
                self.parameterized_name(&d.name);
                self.extends(&d.extends);
                self.execution_context(&d.context);
                self.push(" ");
                self.definition_body(&d.definitions);
                if let Some(destructor) = &d.destructor {
                    self.push(" finally ");
                    self.block(destructor);
                }
                self.attributes(&d.attributes);
            }
            Definition::Component(d) => {
                self.visibility(&d.visibility);
                self.push("type component ");
                self.parameterized_name(&d.name);
                if let Some(extends) = &d.extends {
                    self.push(" extends ");
                    self.references(extends);
                }
                self.optional_block(&d.body);
                self.attributes(&d.attributes);
            }
            Definition::Constructor(d) => {
                self.visibility(&d.visibility);
                self.push("constructor ");
                self.parameters(&d.parameters);
                if let Some(call) = &d.super_call {
                    self.push(" : ");
                    self.reference(call);
                }
                self.optional_block(&d.body);
                self.attributes(&d.attributes);
            }
            Definition::Subtype(d) => {
                self.visibility(&d.visibility);
                self.push("type ");
                self.reference(&d.super_type);
                self.push(" ");
                self.parameterized_name(&d.name);
                self.value_constraint(&d.value_constraint);
                self.length_constraint(&d.length_constraint);
                self.attributes(&d.attributes);
            }
            Definition::Structured(d) => {
                self.visibility(&d.visibility);
                self.push("type ");
                self.push(d.kind.as_str());
                self.push(" ");
                self.parameterized_name(&d.name);
                self.push(" ");
                self.fields(&d.fields);
                self.attributes(&d.attributes);
            }
            Definition::List(d) => {
                self.visibility(&d.visibility);
                self.push(match d.kind {
                    ListKind::RecordOf => "type record",
                    ListKind::SetOf => "type set",
                });
                self.length_constraint(&d.length_constraint);
                self.push(" of ");
                self.reference(&d.element_type);
                self.push(" ");
                self.parameterized_name(&d.name);
                self.value_constraint(&d.element_value_constraint);
                self.length_constraint(&d.element_length_constraint);
                self.attributes(&d.attributes);
            }
            Definition::Map(d) => {
                self.visibility(&d.visibility);
                self.push("type map from ");
                self.reference(&d.key_type);
                self.push(" to ");
                self.reference(&d.value_type);
                self.push(" ");
                self.parameterized_name(&d.name);
                self.attributes(&d.attributes);
            }
            Definition::Enumerated(d) => {
                self.visibility(&d.visibility);
                self.push("type enumerated ");
                self.parameterized_name(&d.name);
                if d.values.is_empty() {
                    self.push(" {}");
                } else {
                    self.push(" { ");
                    self.join(&d.values, ", ", |p, v| p.enum_value(v));
                    self.push(" }");
                }
                self.attributes(&d.attributes);
            }
            Definition::PortType(d) => self.port_type(d),
            Definition::Signature(d) => {
                self.visibility(&d.visibility);
                self.push("signature ");
                self.parameterized_name(&d.name);
                self.parameters(&d.parameters);
                self.return_type(&d.return_type);
                self.exception(&d.exception);
                self.attributes(&d.attributes);
            }
            Definition::Var(d) => self.value_decl("var", d),
            Definition::Const(d) => self.value_decl("const", d),
            Definition::ModulePar(d) => self.value_decl("modulepar", d),
            Definition::Timer(d) => self.timer_decl(d),
            Definition::Port(d) => self.port_decl(d),
            Definition::Template(d) => self.template_def(d),
            Definition::Friend(d) => {
                if d.private {
                    self.push("private ");
                }
                self.push("friend module ");
                self.references(&d.modules);
                self.attributes(&d.attributes);
            }
            Definition::Import(d) => self.import(d),
            Definition::Mode(d) => {
                self.visibility(&d.visibility);
                self.push("mode ");
                self.parameterized_name(&d.name);
                if let Some(parameters) = &d.parameters {
                    self.parameters(parameters);
                }
                if let Some(runs_on) = &d.runs_on {
                    self.push(" runs on ");
                    self.reference(runs_on);
                }
                self.push(" {}");
                self.attributes(&d.attributes);
            }
            Definition::Error(e) => self.push(&e.text),
        }
    }

    fn definition_body(&mut self, definitions: &[Definition]) {
        self.braced(definitions, |p, d| p.definition(d));
    }

    fn visibility(&mut self, visibility: &Option<Visibility>) {
        if let Some(v) = visibility {
            self.push(v.as_str());
            self.push(" ");
        }
    }

    fn modifiers(&mut self, modifiers: &[Modifier]) {
        for m in modifiers {
            self.push(" ");
            self.push(&m.text);
        }
    }

    fn extends(&mut self, extends: &Option<Reference>) {
        if let Some(base) = extends {
            self.push(" extends ");
            self.reference(base);
        }
    }

    fn runs_on_system(&mut self, component: &Reference, system: &Option<Reference>) {
        self.push(" runs on ");
        self.reference(component);
        if let Some(system) = system {
            self.push(" system ");
            self.reference(system);
        }
    }

    fn execution_context(&mut self, context: &ExecutionContext) {
        if let Some(r) = &context.runs_on {
            self.push(" runs on ");
            self.reference(r);
        }
        if let Some(r) = &context.mtc {
            self.push(" mtc ");
            self.reference(r);
        }
        if let Some(r) = &context.system {
            self.push(" system ");
            self.reference(r);
        }
    }

    fn return_type(&mut self, return_type: &Option<ReturnType>) {
        if let Some(rt) = return_type {
            self.push(" return ");
            self.nested_template(&rt.template_restriction);
            self.reference(&rt.ty);
        }
    }

    fn exception(&mut self, exception: &Option<Vec<Reference>>) {
        if let Some(refs) = exception {
            self.push(" exception (");
            self.references(refs);
            self.push(")");
        }
    }

    fn optional_block(&mut self, body: &Option<Block>) {
        if let Some(block) = body {
            self.push(" ");
            self.block(block);
        }
    }

    fn parameterized_name(&mut self, name: &ParameterizedName) {
        self.push(&name.name.text);
        if let Some(params) = &name.type_parameters {
            self.push("<");
            self.join(params, ", ", |p, tp| {
                p.push("in ");
                match &tp.kind {
                    TypeParameterKind::Type(ty) => {
                        p.reference(ty);
                        p.push(" ");
                    }
                    TypeParameterKind::TypeKeyword => p.push("type "),
                    TypeParameterKind::SignatureKeyword => p.push("signature "),
                }
                p.push(&tp.name.text);
                if let Some(default) = &tp.default {
                    p.push(" := ");
                    p.reference(default);
                }
            });
            self.push(">");
        }
    }

    fn parameters(&mut self, parameters: &[Parameter]) {
        self.push("(");
        self.join(parameters, ", ", |p, param| p.parameter(param));
        self.push(")");
    }

    fn parameter(&mut self, param: &Parameter) {
        if let Some(direction) = param.direction {
            self.push(direction.as_str());
            self.push(" ");
        }
        self.nested_template(&param.template_restriction);
        self.reference(&param.ty);
        self.push(" ");
        self.push(&param.name.text);
        self.array_def(&param.array_def);
        if param.variadic {
            self.push(" ...");
        }
        if let Some(default) = &param.default {
            self.push(" := ");
            self.expression(default);
        }
    }

    /// Written with a trailing space
    fn nested_template(&mut self, nested: &Option<NestedTemplate>) {
        match nested {
            Some(NestedTemplate::Template(None)) => self.push("template "),
            Some(NestedTemplate::Template(Some(r))) => {
                self.push("template (");
                self.push(r.as_str());
                self.push(") ");
            }
            Some(NestedTemplate::Restriction(r)) => {
                self.push(r.as_str());
                self.push(" ");
            }
            None => {}
        }
    }

    fn array_def(&mut self, dims: &[Expression]) {
        for dim in dims {
            self.push("[");
            self.expression(dim);
            self.push("]");
        }
    }

    fn value_constraint(&mut self, values: &Option<ListExpr>) {
        if let Some(values) = values {
            self.push(" ");
            self.list("(", ")", &values.items);
        }
    }

    fn length_constraint(&mut self, length: &Option<LengthSpec>) {
        if let Some(spec) = length {
            self.push(" length(");
            if let Some(lower) = &spec.lower {
                self.boundary(lower);
                self.push(" .. ");
            }
            self.boundary(&spec.upper);
            self.push(")");
        }
    }

    fn boundary(&mut self, boundary: &Boundary) {
        if boundary.exclusive {
            self.push("!");
        }
        match &boundary.value {
            BoundaryValue::Number(n) => self.push(n),
            BoundaryValue::Reference(r) => self.reference(r),
        }
    }

    fn fields(&mut self, fields: &[Field]) {
        if fields.is_empty() {
            self.push("{}");
            return;
        }
        self.push("{");
        self.indent += 1;
        for (i, field) in fields.iter().enumerate() {
            self.line();
            self.field(field);
            if i + 1 < fields.len() {
                self.push(",");
            }
        }
        self.indent -= 1;
        self.line();
        self.push("}");
    }

    fn field(&mut self, field: &Field) {
        if field.default {
            self.push("@default ");
        }
        self.reference(&field.ty);
        if let Some(name) = &field.name {
            self.push(" ");
            self.push(&name.text);
        }
        self.array_def(&field.array_def);
        self.value_constraint(&field.value_constraint);
        self.length_constraint(&field.length_constraint);
        if field.optional {
            self.push(" optional");
        }
    }

    fn enum_value(&mut self, value: &EnumValue) {
        self.push(&value.name.text);
        if let Some(values) = &value.values {
            self.list("(", ")", values);
        }
    }

    fn port_type(&mut self, d: &PortTypeDef) {
        self.visibility(&d.visibility);
        self.push("type port ");
        self.parameterized_name(&d.name);
        if let Some(refs) = &d.map_to {
            self.push(" map to ");
            self.references(refs);
        }
        if let Some(refs) = &d.connect_to {
            self.push(" connect to ");
            self.references(refs);
        }
        self.push(" ");
        self.push(d.kind.as_str());
        if d.realtime {
            self.push(" realtime");
        }
        if let Some(attributes) = &d.port_attributes {
            self.push(" ");
            self.braced(attributes, |p, a| p.port_attribute(a));
        }
        self.attributes(&d.attributes);
    }

    fn port_attribute(&mut self, attribute: &PortAttribute) {
        match attribute {
            PortAttribute::Var(d) => self.value_decl("var", d),
            PortAttribute::Const(d) => self.value_decl("const", d),
            PortAttribute::Address(spec) => {
                self.push("address ");
                self.translation_spec(spec);
            }
            PortAttribute::MapParam(params) => {
                self.push("map param ");
                self.parameters(params);
            }
            PortAttribute::UnmapParam(params) => {
                self.push("unmap param ");
                self.parameters(params);
            }
            PortAttribute::Messages { direction, messages } => {
                self.push(direction.as_str());
                self.push(" ");
                self.join(messages, ", ", |p, m| p.translation_spec(m));
            }
        }
    }

    fn translation_spec(&mut self, spec: &TranslationSpec) {
        self.reference(&spec.ty);
        if let Some(t) = &spec.translate {
            self.push(match t.direction {
                TranslationDirection::From => " from ",
                TranslationDirection::To => " to ",
            });
            self.reference(&t.outer_type);
            self.push(" with ");
            self.reference(&t.translator);
            self.push("()");
        }
    }

    fn value_decl(&mut self, keyword: &str, d: &VarDecl) {
        self.visibility(&d.visibility);
        self.push(keyword);
        self.push(" ");
        self.nested_template(&d.template_restriction);
        if let Some(ty) = &d.ty {
            self.reference(ty);
            self.push(" ");
        }
        self.declarators(&d.declarators);
        self.attributes(&d.attributes);
    }

    fn timer_decl(&mut self, d: &TimerDecl) {
        self.visibility(&d.visibility);
        self.push("timer ");
        self.declarators(&d.declarators);
        self.attributes(&d.attributes);
    }

    fn port_decl(&mut self, d: &PortDecl) {
        self.visibility(&d.visibility);
        self.push("port ");
        self.reference(&d.ty);
        self.push(" ");
        self.declarators(&d.declarators);
        self.attributes(&d.attributes);
    }

    fn declarators(&mut self, declarators: &[Declarator]) {
        self.join(declarators, ", ", |p, d| {
            p.parameterized_name(&d.name);
            p.array_def(&d.array_def);
            if let Some(value) = &d.value {
                p.push(" := ");
                p.expression(value);
            }
        });
    }

    fn template_def(&mut self, d: &TemplateDef) {
        self.visibility(&d.visibility);
        self.push("template");
        if let Some(r) = d.restriction {
            self.push(" (");
            self.push(r.as_str());
            self.push(")");
        }
        self.modifiers(&d.modifiers);
        self.push(" ");
        self.reference(&d.ty);
        self.push(" ");
        self.parameterized_name(&d.name);
        if let Some(parameters) = &d.parameters {
            self.parameters(parameters);
        }
        if let Some(base) = &d.modifies {
            self.push(" modifies ");
            self.reference(base);
        }
        self.push(" := ");
        self.expression(&d.value);
        self.attributes(&d.attributes);
    }

    fn import(&mut self, d: &ImportDef) {
        self.visibility(&d.visibility);
        self.push("import from ");
        self.reference(&d.module);
        if let Some(local) = &d.local_name {
            self.push(" -> ");
            self.push(&local.text);
        }
        match &d.body {
            ImportBody::All { except } => {
                self.push(" all");
                if let Some(specs) = except {
                    self.push(" except ");
                    self.except_specs(specs);
                }
            }
            ImportBody::Specs(specs) => {
                self.push(" ");
                self.braced(specs, |p, s| p.import_spec(s));
            }
        }
        self.attributes(&d.attributes);
    }

    fn except_specs(&mut self, specs: &[ExceptSpec]) {
        self.push("{");
        for spec in specs {
            self.push(" ");
            self.push(spec.kind.as_str());
            self.push(" ");
            match &spec.refs {
                Some(refs) => self.references(refs),
                None => self.push("all"),
            }
            self.push(";");
        }
        self.push(" }");
    }

    fn import_spec(&mut self, spec: &ImportSpec) {
        match spec {
            ImportSpec::Group { groups, .. } => {
                self.push("group ");
                self.join(groups, ", ", |p, g| {
                    p.reference(&g.reference);
                    if let Some(specs) = &g.except {
                        p.push(" except ");
                        p.except_specs(specs);
                    }
                });
            }
            ImportSpec::Kind { kind, refs, .. } => {
                self.push(kind.as_str());
                self.push(" ");
                match refs {
                    ImportRefs::List(refs) => self.references(refs),
                    ImportRefs::All { except } => {
                        self.push("all");
                        if let Some(refs) = except {
                            self.push(" except ");
                            self.references(refs);
                        }
                    }
                }
            }
        }
    }

    fn attributes(&mut self, attributes: &Option<WithAttributes>) {
        let Some(with) = attributes else {
            return;
        };
        self.push(" with {");
        for attribute in &with.attributes {
            self.push(" ");
            self.attribute(attribute);
            self.push(";");
        }
        self.push(" }");
    }

    fn attribute(&mut self, attribute: &Attribute) {
        self.push(attribute.kind.as_str());
        match attribute.modifier {
            Some(AttributeModifier::Override) => self.push(" override"),
            Some(AttributeModifier::Local) => self.push(" @local"),
            None => {}
        }
        if let Some(specifiers) = &attribute.specifiers {
            self.push(" (");
            self.join(specifiers, ", ", |p, s| {
                p.reference(&s.reference);
                if let Some(except) = &s.except {
                    p.push(" except { ");
                    p.references(except);
                    p.push(" }");
                }
            });
            self.push(")");
        }
        if let Some(encodings) = &attribute.encodings {
            self.push(" { ");
            self.push(&encodings.join(", "));
            self.push(" }");
        }
        self.push(" ");
        self.push(&attribute.value);
    }

    // ==================== statements ====================

    fn block(&mut self, block: &Block) {
        self.braced(&block.statements, |p, s| p.statement(s));
        for clause in &block.catches {
            self.push(" catch ");
            self.braced(&clause.statements, |p, s| p.statement(s));
        }
        if let Some(clause) = &block.finally {
            self.push(" finally ");
            self.braced(&clause.statements, |p, s| p.statement(s));
        }
    }

    fn statement(&mut self, stmt: &Statement) {
        ensure_sufficient_stack(|| self.statement_inner(stmt))
    }

    fn statement_inner(&mut self, stmt: &Statement) {
        match stmt {
            Statement::Block(b) => self.block(b),
            Statement::Reference(r) => self.reference(r),
            Statement::Redirection(r) => self.redirection(r),
            Statement::Assignment(a) => {
                self.reference(&a.target);
                self.push(" := ");
                self.expression(&a.value);
            }
            Statement::Var(d) => self.value_decl("var", d),
            Statement::Const(d) => self.value_decl("const", d),
            Statement::Timer(d) => self.timer_decl(d),
            Statement::Port(d) => self.port_decl(d),
            Statement::Template(d) => self.template_def(d),
            Statement::Label(l) => {
                self.push("label ");
                self.push(&l.name.text);
            }
            Statement::Goto(l) => {
                self.push("goto ");
                self.push(&l.name.text);
            }
            Statement::Break(j) => self.jump("break", j),
            Statement::Continue(j) => self.jump("continue", j),
            Statement::Return(r) => {
                self.push("return");
                if let Some(value) = &r.value {
                    self.push(" ");
                    self.expression(value);
                }
            }
            Statement::If(s) => self.if_stmt(s),
            Statement::Select(s) => self.select_stmt(s),
            Statement::For(s) => {
                self.push("for (");
                if let Some(init) = &s.init {
                    self.statement(init);
                }
                self.push(";");
                if let Some(condition) = &s.condition {
                    self.push(" ");
                    self.expression(condition);
                }
                self.push(";");
                if let Some(post) = &s.post {
                    self.push(" ");
                    self.statement(post);
                }
                self.push(") ");
                self.block(&s.body);
            }
            Statement::ForRange(s) => {
                self.push("for (");
                match s.binding {
                    Some(RangeBinding::Var) => self.push("var "),
                    Some(RangeBinding::Const) => self.push("const "),
                    None => {}
                }
                self.push(&s.name.text);
                self.push(" in ");
                self.expression(&s.range);
                self.push(") ");
                self.block(&s.body);
            }
            Statement::While(s) => {
                self.push("while (");
                self.init(&s.init);
                self.expression(&s.condition);
                self.push(") ");
                self.block(&s.body);
            }
            Statement::DoWhile(s) => {
                self.push("do ");
                self.block(&s.body);
                self.push(" while (");
                self.expression(&s.condition);
                self.push(")");
            }
            Statement::Alt(s) => self.alt_stmt("alt", s),
            Statement::Interleave(s) => self.alt_stmt("interleave", s),
            Statement::Error(e) => self.push(&e.text),
        }
    }

    fn jump(&mut self, keyword: &str, jump: &JumpStmt) {
        self.push(keyword);
        if let Some(label) = &jump.label {
            self.push(" ");
            self.push(&label.text);
        }
    }

    /// `init; ` before a condition
    fn init(&mut self, init: &Option<Box<Statement>>) {
        if let Some(init) = init {
            self.statement(init);
            self.push("; ");
        }
    }

    fn redirection(&mut self, r: &Redirection) {
        self.reference(&r.reference);
        self.push(" ->");
        let clauses = [
            ("value", &r.value),
            ("sender", &r.sender),
            ("verdict", &r.verdict),
            ("param", &r.param),
            ("timestamp", &r.timestamp),
            ("@index value", &r.index_value),
        ];
        for (keyword, clause) in clauses {
            if let Some(expr) = clause {
                self.push(" ");
                self.push(keyword);
                self.push(" ");
                self.expression(expr);
            }
        }
    }

    fn if_stmt(&mut self, s: &IfStmt) {
        self.push("if (");
        self.init(&s.init);
        self.expression(&s.condition);
        self.push(") ");
        self.block(&s.then_branch);
        match &s.else_branch {
            Some(ElseBranch::If(nested)) => {
                self.push(" else ");
                self.if_stmt(nested);
            }
            Some(ElseBranch::Block(block)) => {
                self.push(" else ");
                self.block(block);
            }
            None => {}
        }
    }

    fn select_stmt(&mut self, s: &SelectStmt) {
        self.push(match s.kind {
            SelectKind::Plain => "select (",
            SelectKind::Union => "select union (",
            SelectKind::Class => "select class (",
            SelectKind::Type => "select type (",
        });
        self.init(&s.init);
        self.expression(&s.expression);
        self.push(")");
        self.indent += 1;
        for clause in &s.clauses {
            self.line();
            match clause {
                SelectClause::Case { expression, body, .. } => {
                    self.push("case (");
                    self.expression(expression);
                    self.push(") ");
                    self.block(body);
                }
                SelectClause::Else { body, .. } => {
                    self.push("case else ");
                    self.block(body);
                }
            }
        }
        self.indent -= 1;
    }

    fn alt_stmt(&mut self, keyword: &str, s: &AltStmt) {
        self.push(keyword);
        if s.nodefault {
            self.push(" @nodefault");
        }
        self.push(" ");
        self.alt_block(&s.body);
    }

    fn alt_block(&mut self, block: &AltBlock) {
        self.braced(&block.items, |p, item| p.alt_item(item));
        for clause in &block.catches {
            self.push(" catch ");
            self.braced(&clause.statements, |p, s| p.statement(s));
        }
        if let Some(clause) = &block.finally {
            self.push(" finally ");
            self.braced(&clause.statements, |p, s| p.statement(s));
        }
    }

    fn alt_item(&mut self, item: &AltItem) {
        match item {
            AltItem::Var(d) => self.value_decl("var", d),
            AltItem::Const(d) => self.value_decl("const", d),
            AltItem::Timer(d) => self.timer_decl(d),
            AltItem::Port(d) => self.port_decl(d),
            AltItem::Template(d) => self.template_def(d),
            AltItem::Guarded(g) => {
                self.push("[");
                if let Some(condition) = &g.condition {
                    self.expression(condition);
                }
                self.push("] ");
                match &g.stmt {
                    Communication::Reference(r) => self.reference(r),
                    Communication::Redirection(r) => self.redirection(r),
                }
                if let Some(body) = &g.body {
                    self.push(" ");
                    self.block(body);
                }
            }
            AltItem::Else(e) => {
                self.push("[else] ");
                self.block(&e.body);
            }
            AltItem::Error(e) => self.push(&e.text),
        }
    }

    // ==================== expressions ====================

    fn expression(&mut self, expr: &Expression) {
        ensure_sufficient_stack(|| self.expression_inner(expr))
    }

    fn expression_inner(&mut self, expr: &Expression) {
        match expr {
            Expression::Unary(u) => {
                self.push(u.op.symbol());
                let operand = self.capture(|p| p.expression(&u.operand));
                let spaced = matches!(u.op, UnaryOp::Not | UnaryOp::Not4b)
                    || operand.starts_with(|c| matches!(c, '+' | '-' | '!'));
                if spaced {
                    self.push(" ");
                }
                self.push(&operand);
            }
            Expression::Binary(b) => {
                self.expression(&b.left);
                self.push(" ");
                self.push(b.op.symbol());
                self.push(" ");
                self.expression(&b.right);
            }
            Expression::Literal(l) => self.push(&l.text),
            Expression::TemplateValues(list) => self.list("(", ")", &list.items),
            Expression::Composite(list) => {
                if list.items.is_empty() {
                    self.push("{}");
                } else {
                    self.list("{ ", " }", &list.items);
                }
            }
            Expression::FunctionLiteral(f) => {
                self.push("function");
                self.modifiers(&f.modifiers);
                self.push(" ");
                self.parameters(&f.parameters);
                self.execution_context(&f.context);
                self.return_type(&f.return_type);
                self.exception(&f.exception);
                self.push(" ");
                self.block(&f.body);
            }
            Expression::InlineTemplate(t) => {
                self.reference(&t.ty);
                self.push(" : ");
                self.expression(&t.value);
            }
            Expression::Reference(r) => self.reference(r),
            Expression::Range(r) => {
                self.expression(&r.lower);
                self.push(" .. ");
                self.expression(&r.upper);
            }
            Expression::FieldAssignment(a) => {
                self.reference(&a.field);
                self.push(" := ");
                self.expression(&a.value);
            }
        }
    }

    fn list(&mut self, open: &str, close: &str, items: &[Expression]) {
        self.push(open);
        self.join(items, ", ", |p, e| p.expression(e));
        self.push(close);
    }

    fn references(&mut self, refs: &[Reference]) {
        self.join(refs, ", ", |p, r| p.reference(r));
    }

    fn reference(&mut self, reference: &Reference) {
        match reference {
            Reference::Name(name) => self.push(&name.text),
            Reference::Keyword { keyword, .. } => self.push(keyword.as_str()),
            Reference::TypeInstantiation { name, arguments, .. } => {
                self.push(&name.text);
                self.push("<");
                self.references(arguments);
                self.push(">");
            }
            Reference::Selector { operand, field, .. } => {
                self.reference(operand);
                self.push(".");
                self.reference(field);
            }
            Reference::Index { operand, indices, .. } => {
                self.reference(operand);
                self.list("[", "]", indices);
            }
            Reference::Call {
                function,
                arguments,
                variadic,
                ..
            } => {
                self.reference(function);
                self.push("(");
                self.join(arguments, ", ", |p, e| p.expression(e));
                if *variadic {
                    self.push(if arguments.is_empty() { "..." } else { ", ..." });
                }
                self.push(")");
            }
            Reference::FromCall {
                quantifier,
                argument,
                ..
            } => {
                self.push(match quantifier {
                    Quantifier::Any => "any from ",
                    Quantifier::All => "all from ",
                });
                self.push(&argument.text);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::parse_source;
    use pretty_assertions::assert_eq;

    fn canonical(source: &str) -> String {
        let output = parse_source(source);
        assert!(output.is_ok(), "{:?}", output.diagnostics);
        render(&output.source_file)
    }

    #[test]
    fn test_module_layout() {
        let rendered = canonical("module M { function f() { var integer x := 1; x := x + 1 } }");
        assert_eq!(
            rendered,
            "module M {\n    function f() {\n        var integer x := 1;\n        x := x + 1;\n    };\n};\n"
        );
    }

    #[test]
    fn test_unary_spacing() {
        assert_eq!(canonical("- -a"), "- -a\n");
        assert_eq!(canonical("-a"), "-a\n");
        assert_eq!(canonical("not a"), "not a\n");
        assert_eq!(canonical("+ +a"), "+ +a\n");
    }

    #[test]
    fn test_variadic_call() {
        assert_eq!(canonical("f(a, ...)"), "f(a, ...)\n");
        assert_eq!(canonical("f(...)"), "f(...)\n");
    }

    #[test]
    fn test_rendering_is_a_fixed_point() {
        let source = r#"
            module M language "TTCN-3:2018" {
                import from N -> L all except { type A, B; const all };
                type record R { @default integer a (1 .. 3) optional, charstring b length(!1 .. 10) };
                type port P message { in integer; out R to octetstring with enc() };
                template (present) R t(integer x) modifies base := { a := x, b := omit }
                altstep as() runs on C { [] p.receive(t) -> value v sender s { break } [else] { } }
                function f() return integer {
                    if (var integer i := 0; i < 10) { continue } else if (x) { } else { return 1 }
                    select union (u) case (a) { } case else { }
                    for (var integer i := 0; i < 3; i := i + 1) { }
                    alt @nodefault { [x > 1] t.timeout; }
                }
            } with { encode "RAW"; variant override (R except { a }) { "BER" } "v" }
        "#;
        let first = parse_source(source);
        let once = render(&first.source_file);
        let second = parse_source(&once);
        assert!(second.is_ok(), "{}\n{:?}", once, second.diagnostics);
        assert_eq!(render(&second.source_file), once);
    }
}
