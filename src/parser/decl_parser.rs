//! Definitions: modules, behaviour, types, declarations and imports

use log::trace;

use crate::ast::*;
use crate::lexer::Token;

use super::expr::starts_reference;
use super::parser_impl::definition_sync;
use super::{ParseResult, Parser};
use crate::stack::ensure_sufficient_stack;

impl Parser {
    /// Definitions up to the end of input, or up to the closing `}` when
    /// `nested`. Each may be followed by `;`. A definition that fails to
    /// parse becomes an error node.
    pub(super) fn parse_definition_list(&mut self, nested: bool) -> Vec<Definition> {
        let mut definitions = Vec::new();
        while !self.is_at_end() {
            if nested && self.check(&Token::RightBrace) {
                break;
            }
            if self.match_token(&Token::Semicolon) {
                continue;
            }
            let start = self.current;
            match self.parse_definition_internal() {
                Ok(definition) => definitions.push(definition),
                Err(e) => {
                    let node = self.recover(e, start, definition_sync);
                    definitions.push(Definition::Error(node));
                }
            }
            self.match_token(&Token::Semicolon);
        }
        definitions
    }

    fn parse_definition_body(&mut self) -> ParseResult<Vec<Definition>> {
        self.expect(Token::LeftBrace)?;
        let definitions = self.parse_definition_list(true);
        self.expect(Token::RightBrace)?;
        Ok(definitions)
    }

    pub(super) fn parse_definition_internal(&mut self) -> ParseResult<Definition> {
        ensure_sufficient_stack(|| self.parse_definition_inner())
    }

    fn parse_definition_inner(&mut self) -> ParseResult<Definition> {
        let start = self.current_span().start;

        if self.check(&Token::Private) && self.peek_is(1, &Token::Friend) && self.peek_is(2, &Token::Module) {
            self.advance();
            return Ok(Definition::Friend(self.parse_friend(true, start)?));
        }
        if self.check(&Token::Friend) && self.peek_is(1, &Token::Module) {
            return Ok(Definition::Friend(self.parse_friend(false, start)?));
        }

        let visibility = self.parse_visibility();

        match self.current_token() {
            Some(Token::Module) => {
                if visibility.is_some() {
                    return Err(self.error("a module cannot have a visibility".to_string()));
                }
                Ok(Definition::Module(self.parse_module(start)?))
            }
            Some(Token::Group) => Ok(Definition::Group(self.parse_group(visibility, start)?)),
            Some(Token::Function) => Ok(Definition::Function(self.parse_function(visibility, start)?)),
            Some(Token::External) => Ok(Definition::ExternalFunction(
                self.parse_external_function(visibility, start)?,
            )),
            Some(Token::Altstep) => Ok(Definition::Altstep(self.parse_altstep(visibility, start)?)),
            Some(Token::Testcase) => Ok(Definition::Testcase(self.parse_testcase(visibility, start)?)),
            Some(Token::Configuration) => Ok(Definition::Configuration(
                self.parse_configuration(visibility, start)?,
            )),
            Some(Token::Control) => Ok(Definition::Control(self.parse_control(visibility, start)?)),
            Some(Token::Type) => self.parse_type_definition(visibility, start),
            Some(Token::Var) => Ok(Definition::Var(self.parse_value_decl(visibility, start)?)),
            Some(Token::Const) => Ok(Definition::Const(self.parse_value_decl(visibility, start)?)),
            Some(Token::Modulepar) => Ok(Definition::ModulePar(self.parse_value_decl(visibility, start)?)),
            Some(Token::Timer) => Ok(Definition::Timer(self.parse_timer_decl(visibility, start)?)),
            Some(Token::Port) => Ok(Definition::Port(self.parse_port_decl(visibility, start)?)),
            Some(Token::Template) => Ok(Definition::Template(self.parse_template_def(visibility, start)?)),
            Some(Token::Signature) => Ok(Definition::Signature(self.parse_signature(visibility, start)?)),
            Some(Token::Import) => Ok(Definition::Import(self.parse_import(visibility, start)?)),
            Some(Token::Constructor) => Ok(Definition::Constructor(
                self.parse_constructor(visibility, start)?,
            )),
            Some(Token::Identifier(w)) if w == "mode" && matches!(self.peek(1), Some(Token::Identifier(_))) => {
                Ok(Definition::Mode(self.parse_mode(visibility, start)?))
            }
            _ => Err(self.expected("definition")),
        }
    }

    fn parse_visibility(&mut self) -> Option<Visibility> {
        let visibility = match self.current_token()? {
            Token::Public => Visibility::Public,
            Token::Private => Visibility::Private,
            Token::Friend => Visibility::Friend,
            _ => return None,
        };
        self.advance();
        Some(visibility)
    }

    // ==================== modules and groups ====================

    /// `module Name language "x" { definitions } with { ... }`
    fn parse_module(&mut self, start: usize) -> ParseResult<ModuleDef> {
        self.expect(Token::Module)?;
        let name = self.parse_parameterized_name()?;
        let language = if self.match_word("language") {
            let mut specs = vec![self.expect_charstring()?];
            while self.match_token(&Token::Comma) {
                if !matches!(self.current_token(), Some(Token::Charstring(_))) {
                    break;
                }
                specs.push(self.expect_charstring()?);
            }
            Some(specs)
        } else {
            None
        };
        let definitions = self.parse_definition_body()?;
        let attributes = self.parse_with_attributes()?;
        Ok(ModuleDef {
            name,
            language,
            definitions,
            attributes,
            span: self.span_from(start),
        })
    }

    fn parse_group(&mut self, visibility: Option<Visibility>, start: usize) -> ParseResult<GroupDef> {
        self.expect(Token::Group)?;
        let name = self.parse_parameterized_name()?;
        let definitions = self.parse_definition_body()?;
        let attributes = self.parse_with_attributes()?;
        Ok(GroupDef {
            visibility,
            name,
            definitions,
            attributes,
            span: self.span_from(start),
        })
    }

    /// `[private] friend module A, B`
    fn parse_friend(&mut self, private: bool, start: usize) -> ParseResult<FriendDef> {
        self.expect(Token::Friend)?;
        self.expect(Token::Module)?;
        let modules = self.parse_references()?;
        let attributes = self.parse_with_attributes()?;
        Ok(FriendDef {
            private,
            modules,
            attributes,
            span: self.span_from(start),
        })
    }

    // ==================== behaviour ====================

    fn parse_optional_block(&mut self) -> ParseResult<Option<Block>> {
        if self.check(&Token::LeftBrace) {
            Ok(Some(self.parse_block()?))
        } else {
            Ok(None)
        }
    }

    fn parse_extends(&mut self) -> ParseResult<Option<Reference>> {
        if self.match_token(&Token::Extends) {
            Ok(Some(self.parse_type()?))
        } else {
            Ok(None)
        }
    }

    /// `runs on C [system S]`, required
    fn parse_runs_on_system(&mut self) -> ParseResult<(Reference, Option<Reference>)> {
        self.expect(Token::Runs)?;
        self.expect(Token::On)?;
        let component = self.parse_type()?;
        let system = if self.match_word("system") {
            Some(self.parse_type()?)
        } else {
            None
        };
        Ok((component, system))
    }

    /// A function without a body is a forward declaration.
    fn parse_function(&mut self, visibility: Option<Visibility>, start: usize) -> ParseResult<FunctionDef> {
        self.expect(Token::Function)?;
        let modifiers = self.parse_modifiers();
        let name = self.parse_parameterized_name()?;
        let parameters = self.parse_parameters()?;
        let extends = self.parse_extends()?;
        let context = self.parse_execution_context()?;
        let return_type = self.parse_return_type()?;
        let exception = self.parse_exception_clause()?;
        let body = self.parse_optional_block()?;
        let attributes = self.parse_with_attributes()?;
        Ok(FunctionDef {
            visibility,
            modifiers,
            name,
            parameters,
            extends,
            context,
            return_type,
            exception,
            body,
            attributes,
            span: self.span_from(start),
        })
    }

    /// `external function`; `extends` may come before or after the
    /// parameters
    fn parse_external_function(
        &mut self,
        visibility: Option<Visibility>,
        start: usize,
    ) -> ParseResult<ExternalFunctionDef> {
        self.expect(Token::External)?;
        self.expect(Token::Function)?;
        let modifiers = self.parse_modifiers();
        let name = self.parse_parameterized_name()?;
        let mut extends = self.parse_extends()?;
        let parameters = self.parse_parameters()?;
        if extends.is_none() {
            extends = self.parse_extends()?;
        }
        let return_type = self.parse_return_type()?;
        let exception = self.parse_exception_clause()?;
        let attributes = self.parse_with_attributes()?;
        Ok(ExternalFunctionDef {
            visibility,
            modifiers,
            name,
            parameters,
            extends,
            return_type,
            exception,
            attributes,
            span: self.span_from(start),
        })
    }

    fn parse_altstep(&mut self, visibility: Option<Visibility>, start: usize) -> ParseResult<AltstepDef> {
        self.expect(Token::Altstep)?;
        let modifiers = self.parse_modifiers();
        let interleave = self.match_token(&Token::Interleave);
        let name = self.parse_parameterized_name()?;
        let parameters = self.parse_parameters()?;
        let context = self.parse_execution_context()?;
        let exception = self.parse_exception_clause()?;
        let body = if self.check(&Token::LeftBrace) {
            Some(self.parse_alt_block()?)
        } else {
            None
        };
        let attributes = self.parse_with_attributes()?;
        Ok(AltstepDef {
            visibility,
            modifiers,
            interleave,
            name,
            parameters,
            context,
            exception,
            body,
            attributes,
            span: self.span_from(start),
        })
    }

    fn parse_testcase(&mut self, visibility: Option<Visibility>, start: usize) -> ParseResult<TestcaseDef> {
        self.expect(Token::Testcase)?;
        let name = self.parse_parameterized_name()?;
        let parameters = self.parse_parameters()?;
        let runs = if self.match_word("execute") {
            self.expect(Token::On)?;
            Some(TestcaseRuns::ExecuteOn(self.parse_type()?))
        } else if self.check(&Token::Runs) {
            let (component, system) = self.parse_runs_on_system()?;
            Some(TestcaseRuns::RunsOn { component, system })
        } else {
            None
        };
        let body = self.parse_optional_block()?;
        let attributes = self.parse_with_attributes()?;
        Ok(TestcaseDef {
            visibility,
            name,
            parameters,
            runs,
            body,
            attributes,
            span: self.span_from(start),
        })
    }

    fn parse_configuration(
        &mut self,
        visibility: Option<Visibility>,
        start: usize,
    ) -> ParseResult<ConfigurationDef> {
        self.expect(Token::Configuration)?;
        let name = self.parse_parameterized_name()?;
        let parameters = self.parse_parameters()?;
        let (runs_on, system) = self.parse_runs_on_system()?;
        let body = self.parse_optional_block()?;
        let attributes = self.parse_with_attributes()?;
        Ok(ConfigurationDef {
            visibility,
            name,
            parameters,
            runs_on,
            system,
            body,
            attributes,
            span: self.span_from(start),
        })
    }

    fn parse_control(&mut self, visibility: Option<Visibility>, start: usize) -> ParseResult<ControlDef> {
        self.expect(Token::Control)?;
        let body = self.parse_block()?;
        let attributes = self.parse_with_attributes()?;
        Ok(ControlDef {
            visibility,
            body,
            attributes,
            span: self.span_from(start),
        })
    }

    /// `constructor (params) : super(args) { ... }`
    fn parse_constructor(
        &mut self,
        visibility: Option<Visibility>,
        start: usize,
    ) -> ParseResult<ConstructorDef> {
        self.expect(Token::Constructor)?;
        let parameters = self.parse_parameters()?;
        let super_call = if self.match_token(&Token::Colon) {
            Some(self.parse_reference()?)
        } else {
            None
        };
        let body = self.parse_optional_block()?;
        let attributes = self.parse_with_attributes()?;
        Ok(ConstructorDef {
            visibility,
            parameters,
            super_call,
            body,
            attributes,
            span: self.span_from(start),
        })
    }

    /// `signature S(params)` with `exception (...)` and `return T` in
    /// either order
    fn parse_signature(&mut self, visibility: Option<Visibility>, start: usize) -> ParseResult<SignatureDef> {
        self.expect(Token::Signature)?;
        let name = self.parse_parameterized_name()?;
        let parameters = self.parse_parameters()?;
        let mut exception = self.parse_exception_clause()?;
        let return_type = self.parse_return_type()?;
        if exception.is_none() {
            exception = self.parse_exception_clause()?;
        }
        let attributes = self.parse_with_attributes()?;
        Ok(SignatureDef {
            visibility,
            name,
            parameters,
            exception,
            return_type,
            attributes,
            span: self.span_from(start),
        })
    }

    /// `mode Name(params) runs on C { }`
    fn parse_mode(&mut self, visibility: Option<Visibility>, start: usize) -> ParseResult<ModeDef> {
        self.expect_word("mode")?;
        let name = self.parse_parameterized_name()?;
        let parameters = if self.check(&Token::LeftParen) {
            Some(self.parse_parameters()?)
        } else {
            None
        };
        let runs_on = if self.match_token(&Token::Runs) {
            self.expect(Token::On)?;
            Some(self.parse_type()?)
        } else {
            None
        };
        self.expect(Token::LeftBrace)?;
        self.expect(Token::RightBrace)?;
        let attributes = self.parse_with_attributes()?;
        Ok(ModeDef {
            visibility,
            name,
            parameters,
            runs_on,
            attributes,
            span: self.span_from(start),
        })
    }

    // ==================== types ====================

    fn parse_type_definition(&mut self, visibility: Option<Visibility>, start: usize) -> ParseResult<Definition> {
        self.expect(Token::Type)?;
        match self.current_token() {
            Some(Token::Altstep) => Ok(Definition::AltstepType(self.parse_altstep_type(visibility, start)?)),
            Some(Token::Testcase) => Ok(Definition::TestcaseType(self.parse_testcase_type(visibility, start)?)),
            Some(Token::Function) => Ok(Definition::FunctionType(self.parse_function_type(visibility, start)?)),
            Some(Token::External) | Some(Token::Class) => Ok(Definition::Class(self.parse_class(visibility, start)?)),
            Some(Token::Component) => Ok(Definition::Component(self.parse_component(visibility, start)?)),
            Some(Token::Record) | Some(Token::Set)
                if matches!(self.peek(1), Some(Token::Length) | Some(Token::Of)) =>
            {
                Ok(Definition::List(self.parse_list_type(visibility, start)?))
            }
            Some(Token::Record) | Some(Token::Set) | Some(Token::Union) => {
                Ok(Definition::Structured(self.parse_structured_type(visibility, start)?))
            }
            Some(Token::Enumerated) => Ok(Definition::Enumerated(self.parse_enumerated(visibility, start)?)),
            Some(Token::Port) => Ok(Definition::PortType(self.parse_port_type(visibility, start)?)),
            Some(Token::Identifier(w)) if w == "map" && self.peek_is(1, &Token::From) => {
                Ok(Definition::Map(self.parse_map_type(visibility, start)?))
            }
            _ => Ok(Definition::Subtype(self.parse_subtype(visibility, start)?)),
        }
    }

    fn parse_altstep_type(&mut self, visibility: Option<Visibility>, start: usize) -> ParseResult<AltstepTypeDef> {
        self.expect(Token::Altstep)?;
        let name = self.parse_parameterized_name()?;
        let parameters = self.parse_parameters()?;
        let context = self.parse_execution_context()?;
        let attributes = self.parse_with_attributes()?;
        Ok(AltstepTypeDef {
            visibility,
            name,
            parameters,
            context,
            attributes,
            span: self.span_from(start),
        })
    }

    fn parse_testcase_type(&mut self, visibility: Option<Visibility>, start: usize) -> ParseResult<TestcaseTypeDef> {
        self.expect(Token::Testcase)?;
        let name = self.parse_parameterized_name()?;
        let parameters = self.parse_parameters()?;
        let (runs_on, system) = self.parse_runs_on_system()?;
        let attributes = self.parse_with_attributes()?;
        Ok(TestcaseTypeDef {
            visibility,
            name,
            parameters,
            runs_on,
            system,
            attributes,
            span: self.span_from(start),
        })
    }

    fn parse_function_type(&mut self, visibility: Option<Visibility>, start: usize) -> ParseResult<FunctionTypeDef> {
        self.expect(Token::Function)?;
        let name = self.parse_parameterized_name()?;
        let parameters = self.parse_parameters()?;
        let extends = self.parse_extends()?;
        let context = self.parse_execution_context()?;
        let return_type = self.parse_return_type()?;
        let attributes = self.parse_with_attributes()?;
        Ok(FunctionTypeDef {
            visibility,
            name,
            parameters,
            extends,
            context,
            return_type,
            attributes,
            span: self.span_from(start),
        })
    }

    /// `type [external] class @mods Name extends B runs on C { ... } finally { ... }`
    fn parse_class(&mut self, visibility: Option<Visibility>, start: usize) -> ParseResult<ClassDef> {
        let external = self.match_token(&Token::External);
        self.expect(Token::Class)?;
        let modifiers = self.parse_modifiers();
        let name = self.parse_parameterized_name()?;
        let extends = self.parse_extends()?;
        let context = self.parse_execution_context()?;
        let definitions = self.parse_definition_body()?;
        let destructor = if self.match_token(&Token::Finally) {
            Some(self.parse_block()?)
        } else {
            None
        };
        let attributes = self.parse_with_attributes()?;
        Ok(ClassDef {
            visibility,
            external,
            modifiers,
            name,
            extends,
            context,
            definitions,
            destructor,
            attributes,
            span: self.span_from(start),
        })
    }

    fn parse_component(&mut self, visibility: Option<Visibility>, start: usize) -> ParseResult<ComponentDef> {
        self.expect(Token::Component)?;
        let name = self.parse_parameterized_name()?;
        let extends = if self.match_token(&Token::Extends) {
            Some(self.parse_references()?)
        } else {
            None
        };
        let body = self.parse_optional_block()?;
        let attributes = self.parse_with_attributes()?;
        Ok(ComponentDef {
            visibility,
            name,
            extends,
            body,
            attributes,
            span: self.span_from(start),
        })
    }

    fn parse_structured_type(
        &mut self,
        visibility: Option<Visibility>,
        start: usize,
    ) -> ParseResult<StructuredTypeDef> {
        let kind = match self.current_token() {
            Some(Token::Record) => StructuredKind::Record,
            Some(Token::Set) => StructuredKind::Set,
            Some(Token::Union) => StructuredKind::Union,
            _ => return Err(self.expected("`record`, `set` or `union`")),
        };
        self.advance();
        let name = self.parse_parameterized_name()?;
        let fields = self.parse_fields()?;
        let attributes = self.parse_with_attributes()?;
        Ok(StructuredTypeDef {
            visibility,
            kind,
            name,
            fields,
            attributes,
            span: self.span_from(start),
        })
    }

    /// `type record length(n) of T Name (values) length(m)`
    fn parse_list_type(&mut self, visibility: Option<Visibility>, start: usize) -> ParseResult<ListTypeDef> {
        let kind = if self.match_token(&Token::Record) {
            ListKind::RecordOf
        } else {
            self.expect(Token::Set)?;
            ListKind::SetOf
        };
        let length_constraint = self.parse_length_spec()?;
        self.expect(Token::Of)?;
        let element_type = self.parse_type()?;
        let name = self.parse_parameterized_name()?;
        let element_value_constraint = self.parse_value_constraint()?;
        let element_length_constraint = self.parse_length_spec()?;
        let attributes = self.parse_with_attributes()?;
        Ok(ListTypeDef {
            visibility,
            kind,
            length_constraint,
            element_type,
            name,
            element_value_constraint,
            element_length_constraint,
            attributes,
            span: self.span_from(start),
        })
    }

    /// `type map from K to V Name`
    fn parse_map_type(&mut self, visibility: Option<Visibility>, start: usize) -> ParseResult<MapTypeDef> {
        self.expect_word("map")?;
        self.expect(Token::From)?;
        let key_type = self.parse_type()?;
        self.expect(Token::To)?;
        let value_type = self.parse_type()?;
        let name = self.parse_parameterized_name()?;
        let attributes = self.parse_with_attributes()?;
        Ok(MapTypeDef {
            visibility,
            key_type,
            value_type,
            name,
            attributes,
            span: self.span_from(start),
        })
    }

    fn parse_enumerated(&mut self, visibility: Option<Visibility>, start: usize) -> ParseResult<EnumeratedDef> {
        self.expect(Token::Enumerated)?;
        let name = self.parse_parameterized_name()?;
        self.expect(Token::LeftBrace)?;
        let mut values = Vec::new();
        while !self.check(&Token::RightBrace) && !self.is_at_end() {
            values.push(self.parse_enum_value()?);
            if !self.match_token(&Token::Comma) {
                break;
            }
        }
        self.expect(Token::RightBrace)?;
        let attributes = self.parse_with_attributes()?;
        Ok(EnumeratedDef {
            visibility,
            name,
            values,
            attributes,
            span: self.span_from(start),
        })
    }

    fn parse_enum_value(&mut self) -> ParseResult<EnumValue> {
        let start = self.current_span().start;
        let name = self.expect_identifier()?;
        let values = if self.match_token(&Token::LeftParen) {
            let values = self.parse_expression_list(&Token::RightParen)?;
            if values.is_empty() {
                return Err(self.expected("expression"));
            }
            self.expect(Token::RightParen)?;
            Some(values)
        } else {
            None
        };
        Ok(EnumValue {
            name,
            values,
            span: self.span_from(start),
        })
    }

    /// `type Base Name (values) length(n)`
    fn parse_subtype(&mut self, visibility: Option<Visibility>, start: usize) -> ParseResult<SubtypeDef> {
        let super_type = self.parse_type()?;
        let name = self.parse_parameterized_name()?;
        let value_constraint = self.parse_value_constraint()?;
        let length_constraint = self.parse_length_spec()?;
        let attributes = self.parse_with_attributes()?;
        Ok(SubtypeDef {
            visibility,
            super_type,
            name,
            value_constraint,
            length_constraint,
            attributes,
            span: self.span_from(start),
        })
    }

    /// `type port P map to A connect to B message realtime { ... }`
    fn parse_port_type(&mut self, visibility: Option<Visibility>, start: usize) -> ParseResult<PortTypeDef> {
        self.expect(Token::Port)?;
        let name = self.parse_parameterized_name()?;
        let map_to = if self.check_word("map") && self.peek_is(1, &Token::To) {
            self.current += 2;
            Some(self.parse_references()?)
        } else {
            None
        };
        let connect_to = if self.check_word("connect") && self.peek_is(1, &Token::To) {
            self.current += 2;
            Some(self.parse_references()?)
        } else {
            None
        };
        let kind = match self.current_token() {
            Some(Token::Identifier(word)) => PortKind::from_word(word),
            _ => None,
        }
        .ok_or_else(|| self.expected("`procedure`, `message`, `stream` or `mixed`"))?;
        self.advance();
        let realtime = self.match_word("realtime");
        let port_attributes = if self.check(&Token::LeftBrace) {
            Some(self.parse_port_attributes()?)
        } else {
            None
        };
        let attributes = self.parse_with_attributes()?;
        Ok(PortTypeDef {
            visibility,
            name,
            map_to,
            connect_to,
            kind,
            realtime,
            port_attributes,
            attributes,
            span: self.span_from(start),
        })
    }

    fn parse_port_attributes(&mut self) -> ParseResult<Vec<PortAttribute>> {
        self.expect(Token::LeftBrace)?;
        let mut attributes = Vec::new();
        while !self.check(&Token::RightBrace) && !self.is_at_end() {
            if self.match_token(&Token::Semicolon) {
                continue;
            }
            attributes.push(self.parse_port_attribute()?);
            self.match_token(&Token::Semicolon);
        }
        self.expect(Token::RightBrace)?;
        Ok(attributes)
    }

    fn parse_port_attribute(&mut self) -> ParseResult<PortAttribute> {
        let start = self.current_span().start;
        if let Some(direction) = self.parse_direction() {
            let mut messages = vec![self.parse_translation_spec()?];
            while self.match_token(&Token::Comma) {
                if !self.current_token().map(starts_reference).unwrap_or(false) {
                    break;
                }
                messages.push(self.parse_translation_spec()?);
            }
            return Ok(PortAttribute::Messages { direction, messages });
        }
        match self.current_token() {
            Some(Token::Var) => Ok(PortAttribute::Var(self.parse_value_decl(None, start)?)),
            Some(Token::Const) => Ok(PortAttribute::Const(self.parse_value_decl(None, start)?)),
            Some(Token::Identifier(w)) if w == "address" => {
                self.advance();
                Ok(PortAttribute::Address(self.parse_translation_spec()?))
            }
            Some(Token::Identifier(w)) if w == "map" => {
                self.advance();
                self.expect_word("param")?;
                Ok(PortAttribute::MapParam(self.parse_parameters()?))
            }
            Some(Token::Identifier(w)) if w == "unmap" => {
                self.advance();
                self.expect_word("param")?;
                Ok(PortAttribute::UnmapParam(self.parse_parameters()?))
            }
            _ => Err(self.expected("port attribute")),
        }
    }

    /// `T [from|to Outer with f()]`
    fn parse_translation_spec(&mut self) -> ParseResult<TranslationSpec> {
        let start = self.current_span().start;
        let ty = self.parse_type()?;
        let direction = if self.match_token(&Token::From) {
            Some(TranslationDirection::From)
        } else if self.match_token(&Token::To) {
            Some(TranslationDirection::To)
        } else {
            None
        };
        let translate = match direction {
            Some(direction) => {
                let outer_type = self.parse_type()?;
                self.expect(Token::With)?;
                let translator = self.parse_identifier_name_reference()?;
                self.expect(Token::LeftParen)?;
                self.expect(Token::RightParen)?;
                Some(Translation {
                    direction,
                    outer_type,
                    translator,
                })
            }
            None => None,
        };
        Ok(TranslationSpec {
            ty,
            translate,
            span: self.span_from(start),
        })
    }

    /// A reference without a trailing call, for `with f()` where the
    /// parentheses belong to the clause
    fn parse_identifier_name_reference(&mut self) -> ParseResult<Reference> {
        let mut reference = Reference::Name(self.expect_identifier()?);
        while self.match_token(&Token::Dot) {
            let field = Reference::Name(self.expect_identifier()?);
            let span = reference.span().merge(field.span());
            reference = Reference::Selector {
                operand: Box::new(reference),
                field: Box::new(field),
                span,
            };
        }
        Ok(reference)
    }

    // ==================== declarations ====================

    /// `var`, `const` or `modulepar` declaration, keyword at the cursor.
    ///
    /// The head `[template] [Type] name` is ambiguous because the type is
    /// optional. The typed reading is tried first: when `Type name` is
    /// followed by `,`, `:=` or the end of the declaration it is committed,
    /// and errors in its initializers are reported as such. Otherwise the
    /// first identifier is the name.
    pub(super) fn parse_value_decl(
        &mut self,
        visibility: Option<Visibility>,
        start: usize,
    ) -> ParseResult<VarDecl> {
        self.advance();
        let template_restriction = self.parse_nested_template()?;

        let typed = self.speculate(|p| {
            let ty = p.parse_type()?;
            let after_type = p.current;
            p.parse_parameterized_name()?;
            p.parse_array_def()?;
            if p.check(&Token::Comma) || p.check(&Token::Assign) || p.at_statement_boundary(0) {
                Ok((ty, after_type))
            } else {
                Err(p.expected("`,`, `:=` or end of declaration"))
            }
        });
        let ty = match typed {
            Some((ty, after_type)) => {
                self.current = after_type;
                Some(ty)
            }
            None => {
                trace!("declaration at {} has no type", start);
                None
            }
        };
        let declarators = self.parse_declarators()?;

        let attributes = self.parse_with_attributes()?;
        Ok(VarDecl {
            visibility,
            template_restriction,
            ty,
            declarators,
            attributes,
            span: self.span_from(start),
        })
    }

    /// `timer t1, t2 := 1.0`
    pub(super) fn parse_timer_decl(
        &mut self,
        visibility: Option<Visibility>,
        start: usize,
    ) -> ParseResult<TimerDecl> {
        self.expect(Token::Timer)?;
        let declarators = self.parse_declarators()?;
        let attributes = self.parse_with_attributes()?;
        Ok(TimerDecl {
            visibility,
            declarators,
            attributes,
            span: self.span_from(start),
        })
    }

    /// `port P p1, p2`
    pub(super) fn parse_port_decl(
        &mut self,
        visibility: Option<Visibility>,
        start: usize,
    ) -> ParseResult<PortDecl> {
        self.expect(Token::Port)?;
        let ty = self.parse_type()?;
        let declarators = self.parse_declarators()?;
        let attributes = self.parse_with_attributes()?;
        Ok(PortDecl {
            visibility,
            ty,
            declarators,
            attributes,
            span: self.span_from(start),
        })
    }

    /// `template (present) @mods T name(params) modifies base := value`
    pub(super) fn parse_template_def(
        &mut self,
        visibility: Option<Visibility>,
        start: usize,
    ) -> ParseResult<TemplateDef> {
        self.expect(Token::Template)?;
        let restriction = if self.match_token(&Token::LeftParen) {
            let restriction = self
                .parse_template_restriction()
                .ok_or_else(|| self.expected("`omit`, `value` or `present`"))?;
            self.expect(Token::RightParen)?;
            Some(restriction)
        } else {
            None
        };
        let modifiers = self.parse_modifiers();
        let ty = self.parse_type()?;
        let name = self.parse_parameterized_name()?;
        let parameters = if self.check(&Token::LeftParen) {
            Some(self.parse_parameters()?)
        } else {
            None
        };
        let modifies = if self.match_word("modifies") {
            Some(self.parse_reference()?)
        } else {
            None
        };
        self.expect(Token::Assign)?;
        let value = self.parse_expression_internal()?;
        let attributes = self.parse_with_attributes()?;
        Ok(TemplateDef {
            visibility,
            restriction,
            modifiers,
            ty,
            name,
            parameters,
            modifies,
            value,
            attributes,
            span: self.span_from(start),
        })
    }

    // ==================== imports ====================

    /// `import from M -> Local all except { ... }` or `import from M { ... }`
    fn parse_import(&mut self, visibility: Option<Visibility>, start: usize) -> ParseResult<ImportDef> {
        self.expect(Token::Import)?;
        self.expect(Token::From)?;
        let module = self.parse_reference()?;
        let local_name = if self.match_token(&Token::Arrow) {
            Some(self.expect_identifier()?)
        } else {
            None
        };

        let body = if self.match_token(&Token::All) {
            let except = if self.match_token(&Token::Except) {
                Some(self.parse_except_specs()?)
            } else {
                None
            };
            ImportBody::All { except }
        } else {
            self.expect(Token::LeftBrace)?;
            let mut specs = Vec::new();
            while !self.check(&Token::RightBrace) && !self.is_at_end() {
                if self.match_token(&Token::Semicolon) {
                    continue;
                }
                specs.push(self.parse_import_spec()?);
                self.match_token(&Token::Semicolon);
            }
            self.expect(Token::RightBrace)?;
            ImportBody::Specs(specs)
        };

        let attributes = self.parse_with_attributes()?;
        Ok(ImportDef {
            visibility,
            module,
            local_name,
            body,
            attributes,
            span: self.span_from(start),
        })
    }

    fn parse_import_kind(&mut self) -> ParseResult<ImportKind> {
        let kind = match self.current_token() {
            Some(Token::Group) => ImportKind::Group,
            Some(Token::Type) => ImportKind::Type,
            Some(Token::Template) => ImportKind::Template,
            Some(Token::Const) => ImportKind::Const,
            Some(Token::Testcase) => ImportKind::Testcase,
            Some(Token::Altstep) => ImportKind::Altstep,
            Some(Token::Function) => ImportKind::Function,
            Some(Token::Signature) => ImportKind::Signature,
            Some(Token::Modulepar) => ImportKind::Modulepar,
            Some(Token::Import) => ImportKind::Import,
            _ => return Err(self.expected("import kind")),
        };
        self.advance();
        Ok(kind)
    }

    /// `{ kind refs; kind all; ... }`
    fn parse_except_specs(&mut self) -> ParseResult<Vec<ExceptSpec>> {
        self.expect(Token::LeftBrace)?;
        let mut specs = Vec::new();
        while !self.check(&Token::RightBrace) && !self.is_at_end() {
            if self.match_token(&Token::Semicolon) {
                continue;
            }
            let start = self.current_span().start;
            let kind = self.parse_import_kind()?;
            if kind == ImportKind::Import {
                return Err(self.error("`import` cannot be excluded".to_string()));
            }
            let refs = if self.match_token(&Token::All) {
                None
            } else {
                Some(self.parse_references()?)
            };
            specs.push(ExceptSpec {
                kind,
                refs,
                span: self.span_from(start),
            });
            self.match_token(&Token::Semicolon);
        }
        self.expect(Token::RightBrace)?;
        Ok(specs)
    }

    fn parse_import_spec(&mut self) -> ParseResult<ImportSpec> {
        let start = self.current_span().start;
        let kind = self.parse_import_kind()?;

        if kind == ImportKind::Group {
            let mut groups = vec![self.parse_group_import()?];
            while self.match_token(&Token::Comma) {
                if !self.current_token().map(starts_reference).unwrap_or(false) {
                    break;
                }
                groups.push(self.parse_group_import()?);
            }
            return Ok(ImportSpec::Group {
                groups,
                span: self.span_from(start),
            });
        }

        let refs = if self.match_token(&Token::All) {
            let except = if self.match_token(&Token::Except) {
                Some(self.parse_references()?)
            } else {
                None
            };
            ImportRefs::All { except }
        } else {
            ImportRefs::List(self.parse_references()?)
        };
        Ok(ImportSpec::Kind {
            kind,
            refs,
            span: self.span_from(start),
        })
    }

    fn parse_group_import(&mut self) -> ParseResult<GroupImport> {
        let reference = self.parse_reference()?;
        let except = if self.match_token(&Token::Except) {
            Some(self.parse_except_specs()?)
        } else {
            None
        };
        Ok(GroupImport { reference, except })
    }
}
