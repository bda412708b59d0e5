//! Types, parameters, declarators and other clauses shared by definitions

use crate::ast::*;
use crate::lexer::Token;

use super::{ParseResult, Parser};
use crate::stack::ensure_sufficient_stack;

impl Parser {
    /// Types are references: `integer`, `M.T`, `List<T>`, `T[2]`
    pub(super) fn parse_type(&mut self) -> ParseResult<Reference> {
        ensure_sufficient_stack(|| self.parse_reference())
    }

    /// `@a @b ...`, possibly empty
    pub(crate) fn parse_modifiers(&mut self) -> Vec<Modifier> {
        let mut modifiers = Vec::new();
        while let Some(t) = self.tokens.get(self.current) {
            if !matches!(t.token, Token::Modifier(_)) {
                break;
            }
            modifiers.push(Modifier {
                text: t.text.clone(),
                span: t.span.clone().into(),
            });
            self.advance();
        }
        modifiers
    }

    /// A single modifier with this exact spelling
    pub(super) fn match_modifier(&mut self, text: &str) -> bool {
        if matches!(self.current_token(), Some(Token::Modifier(m)) if m == text) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub(super) fn parse_template_restriction(&mut self) -> Option<TemplateRestriction> {
        let restriction = match self.current_token()? {
            Token::Omit => TemplateRestriction::Omit,
            Token::Value => TemplateRestriction::Value,
            Token::Present => TemplateRestriction::Present,
            _ => return None,
        };
        self.advance();
        Some(restriction)
    }

    /// `template`, `template (r)` or a bare restriction keyword
    pub(super) fn parse_nested_template(&mut self) -> ParseResult<Option<NestedTemplate>> {
        if self.match_token(&Token::Template) {
            let mut restriction = None;
            if self.match_token(&Token::LeftParen) {
                restriction = self.parse_template_restriction();
                if restriction.is_none() {
                    return Err(self.expected("`omit`, `value` or `present`"));
                }
                self.expect(Token::RightParen)?;
            }
            return Ok(Some(NestedTemplate::Template(restriction)));
        }
        Ok(self.parse_template_restriction().map(NestedTemplate::Restriction))
    }

    /// `( param, ... )`
    pub(crate) fn parse_parameters(&mut self) -> ParseResult<Vec<Parameter>> {
        self.expect(Token::LeftParen)?;
        let mut parameters = Vec::new();
        while !self.check(&Token::RightParen) && !self.is_at_end() {
            parameters.push(self.parse_parameter()?);
            if !self.match_token(&Token::Comma) {
                break;
            }
        }
        self.expect(Token::RightParen)?;
        Ok(parameters)
    }

    fn parse_parameter(&mut self) -> ParseResult<Parameter> {
        let start = self.current_span().start;
        let direction = self.parse_direction();
        let template_restriction = self.parse_nested_template()?;
        let ty = self.parse_type()?;
        let name = self.expect_identifier()?;
        let array_def = self.parse_array_def()?;
        let variadic = self.match_token(&Token::Ellipsis);
        let default = if self.match_token(&Token::Assign) {
            Some(self.parse_expression_internal()?)
        } else {
            None
        };
        Ok(Parameter {
            direction,
            template_restriction,
            ty,
            name,
            array_def,
            variadic,
            default,
            span: self.span_from(start),
        })
    }

    pub(super) fn parse_direction(&mut self) -> Option<Direction> {
        let direction = match self.current_token()? {
            Token::In => Direction::In,
            Token::Out => Direction::Out,
            Token::Inout => Direction::Inout,
            _ => return None,
        };
        self.advance();
        Some(direction)
    }

    /// `name` with optional `<in type T, ...>`
    pub(super) fn parse_parameterized_name(&mut self) -> ParseResult<ParameterizedName> {
        let name = self.expect_identifier()?;
        let type_parameters = if self.check(&Token::Less)
            && matches!(self.peek(1), Some(Token::In) | Some(Token::Greater))
        {
            Some(self.parse_type_parameters()?)
        } else {
            None
        };
        Ok(ParameterizedName {
            name,
            type_parameters,
        })
    }

    fn parse_type_parameters(&mut self) -> ParseResult<Vec<TypeParameter>> {
        self.expect(Token::Less)?;
        let mut parameters = Vec::new();
        while self.check(&Token::In) {
            parameters.push(self.parse_type_parameter()?);
            if !self.match_token(&Token::Comma) {
                break;
            }
        }
        self.expect(Token::Greater)?;
        Ok(parameters)
    }

    fn parse_type_parameter(&mut self) -> ParseResult<TypeParameter> {
        let start = self.current_span().start;
        self.expect(Token::In)?;
        let kind = if self.match_token(&Token::Type) {
            TypeParameterKind::TypeKeyword
        } else if self.match_token(&Token::Signature) {
            TypeParameterKind::SignatureKeyword
        } else {
            TypeParameterKind::Type(self.parse_type()?)
        };
        let name = self.expect_identifier()?;
        let default = if self.match_token(&Token::Assign) {
            Some(self.parse_type()?)
        } else {
            None
        };
        Ok(TypeParameter {
            kind,
            name,
            default,
            span: self.span_from(start),
        })
    }

    /// `return [template] T`, if present
    pub(crate) fn parse_return_type(&mut self) -> ParseResult<Option<ReturnType>> {
        if !self.check(&Token::Return) {
            return Ok(None);
        }
        let start = self.current_span().start;
        self.advance();
        let template_restriction = self.parse_nested_template()?;
        let ty = self.parse_type()?;
        Ok(Some(ReturnType {
            template_restriction,
            ty,
            span: self.span_from(start),
        }))
    }

    /// `runs on C`, `mtc M` and `system S`, each optional, in this order
    pub(crate) fn parse_execution_context(&mut self) -> ParseResult<ExecutionContext> {
        let mut context = ExecutionContext::default();
        if self.match_token(&Token::Runs) {
            self.expect(Token::On)?;
            context.runs_on = Some(self.parse_type()?);
        }
        if self.match_word("mtc") {
            context.mtc = Some(self.parse_type()?);
        }
        if self.match_word("system") {
            context.system = Some(self.parse_type()?);
        }
        Ok(context)
    }

    /// `exception ( refs )`, if present
    pub(crate) fn parse_exception_clause(&mut self) -> ParseResult<Option<Vec<Reference>>> {
        if !self.match_word("exception") {
            return Ok(None);
        }
        self.expect(Token::LeftParen)?;
        let references = self.parse_references()?;
        self.expect(Token::RightParen)?;
        Ok(Some(references))
    }

    /// `[e][e]...`, possibly empty
    pub(super) fn parse_array_def(&mut self) -> ParseResult<Vec<Expression>> {
        let mut dims = Vec::new();
        while self.match_token(&Token::LeftBracket) {
            dims.push(self.parse_expression_internal()?);
            self.expect(Token::RightBracket)?;
        }
        Ok(dims)
    }

    /// `length ( [lower ..] upper )`, if present
    pub(super) fn parse_length_spec(&mut self) -> ParseResult<Option<LengthSpec>> {
        if !self.check(&Token::Length) {
            return Ok(None);
        }
        let start = self.current_span().start;
        self.advance();
        self.expect(Token::LeftParen)?;
        let first = self.parse_boundary()?;
        let (lower, upper) = if self.match_token(&Token::DotDot) {
            (Some(first), self.parse_boundary()?)
        } else {
            (None, first)
        };
        self.expect(Token::RightParen)?;
        Ok(Some(LengthSpec {
            lower,
            upper,
            span: self.span_from(start),
        }))
    }

    fn parse_boundary(&mut self) -> ParseResult<Boundary> {
        let exclusive = self.match_token(&Token::Bang);
        let value = match self.current_token() {
            Some(Token::Number(n)) => {
                let n = n.clone();
                self.advance();
                BoundaryValue::Number(n)
            }
            _ => BoundaryValue::Reference(self.parse_reference()?),
        };
        Ok(Boundary { exclusive, value })
    }

    /// `(values)` constraint after a type or field, if present
    pub(super) fn parse_value_constraint(&mut self) -> ParseResult<Option<ListExpr>> {
        if self.check(&Token::LeftParen) {
            Ok(Some(self.parse_template_values()?))
        } else {
            Ok(None)
        }
    }

    /// Field of a record, set or union body
    pub(super) fn parse_field(&mut self) -> ParseResult<Field> {
        let start = self.current_span().start;
        let default = self.match_modifier("@default");
        let ty = self.parse_type()?;
        let name = if self.check_identifier() && !self.check_word("optional") {
            Some(self.expect_identifier()?)
        } else {
            None
        };
        let array_def = self.parse_array_def()?;
        let value_constraint = self.parse_value_constraint()?;
        let length_constraint = self.parse_length_spec()?;
        let optional = self.match_word("optional");
        Ok(Field {
            default,
            ty,
            name,
            array_def,
            value_constraint,
            length_constraint,
            optional,
            span: self.span_from(start),
        })
    }

    /// `{ field, ... }`
    pub(super) fn parse_fields(&mut self) -> ParseResult<Vec<Field>> {
        self.expect(Token::LeftBrace)?;
        let mut fields = Vec::new();
        while !self.check(&Token::RightBrace) && !self.is_at_end() {
            fields.push(self.parse_field()?);
            if !self.match_token(&Token::Comma) {
                break;
            }
        }
        self.expect(Token::RightBrace)?;
        Ok(fields)
    }

    /// `name := value, name[2], ...`, at least one
    pub(super) fn parse_declarators(&mut self) -> ParseResult<Vec<Declarator>> {
        let mut declarators = vec![self.parse_declarator()?];
        while self.match_token(&Token::Comma) {
            if !self.check_identifier() {
                break;
            }
            declarators.push(self.parse_declarator()?);
        }
        Ok(declarators)
    }

    fn parse_declarator(&mut self) -> ParseResult<Declarator> {
        let start = self.current_span().start;
        let name = self.parse_parameterized_name()?;
        let array_def = self.parse_array_def()?;
        let value = if self.match_token(&Token::Assign) {
            Some(self.parse_expression_internal()?)
        } else {
            None
        };
        Ok(Declarator {
            name,
            array_def,
            value,
            span: self.span_from(start),
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::*;
    use crate::lexer::tokenize;
    use crate::parser::Parser;
    use pretty_assertions::assert_eq;

    fn parser(source: &str) -> Parser {
        Parser::new(tokenize(source))
    }

    #[test]
    fn test_parameters() {
        let mut p = parser("(in template (present) T t, out integer a[2], inout X x := 1, integer rest ...)");
        let params = p.parse_parameters().unwrap();
        assert_eq!(params.len(), 4);
        assert_eq!(params[0].direction, Some(Direction::In));
        assert_eq!(
            params[0].template_restriction,
            Some(NestedTemplate::Template(Some(TemplateRestriction::Present)))
        );
        assert_eq!(params[1].array_def.len(), 1);
        assert!(params[2].default.is_some());
        assert!(params[3].variadic);
        assert!(p.is_finished());
    }

    #[test]
    fn test_length_spec_with_exclusive_bounds() {
        let mut p = parser("length(!1 .. MAX)");
        let spec = p.parse_length_spec().unwrap().unwrap();
        assert_eq!(
            spec.lower,
            Some(Boundary {
                exclusive: true,
                value: BoundaryValue::Number("1".to_string()),
            })
        );
        assert!(!spec.upper.exclusive);
        assert!(matches!(spec.upper.value, BoundaryValue::Reference(_)));
    }

    #[test]
    fn test_length_spec_requires_closing_paren() {
        let mut p = parser("length(5");
        assert!(p.parse_length_spec().is_err());
    }

    #[test]
    fn test_field_with_constraints() {
        let mut p = parser("@default integer f (1 .. 5) length(1) optional");
        let field = p.parse_field().unwrap();
        assert!(field.default);
        assert_eq!(field.name.map(|n| n.text), Some("f".to_string()));
        assert!(field.value_constraint.is_some());
        assert!(field.length_constraint.is_some());
        assert!(field.optional);
    }

    #[test]
    fn test_type_parameters() {
        let mut p = parser("Stack<in type T := integer, in signature S>");
        let name = p.parse_parameterized_name().unwrap();
        let params = name.type_parameters.unwrap();
        assert_eq!(params.len(), 2);
        assert_eq!(params[0].kind, TypeParameterKind::TypeKeyword);
        assert!(params[0].default.is_some());
        assert_eq!(params[1].kind, TypeParameterKind::SignatureKeyword);
    }

    #[test]
    fn test_execution_context() {
        let mut p = parser("runs on C mtc M system S");
        let ctx = p.parse_execution_context().unwrap();
        assert!(ctx.runs_on.is_some());
        assert!(ctx.mtc.is_some());
        assert!(ctx.system.is_some());
    }
}
