//! Statements and blocks

use log::trace;

use crate::ast::*;
use crate::lexer::Token;

use super::expr::{starts_operand, starts_reference};
use super::parser_impl::statement_sync;
use super::{ParseResult, Parser};
use crate::stack::ensure_sufficient_stack;

impl Parser {
    /// `{ statements } catch { ... } finally { ... }`
    pub(crate) fn parse_block(&mut self) -> ParseResult<Block> {
        ensure_sufficient_stack(|| self.parse_block_inner())
    }

    fn parse_block_inner(&mut self) -> ParseResult<Block> {
        let start = self.current_span().start;
        let statements = self.parse_braced_statements()?;

        let mut catches = Vec::new();
        while self.check(&Token::Catch) {
            catches.push(self.parse_clause()?);
        }
        let finally = if self.check(&Token::Finally) {
            Some(self.parse_clause()?)
        } else {
            None
        };

        Ok(Block {
            statements,
            catches,
            finally,
            span: self.span_from(start),
        })
    }

    /// `catch { ... }` or `finally { ... }`
    pub(super) fn parse_clause(&mut self) -> ParseResult<Clause> {
        let start = self.current_span().start;
        self.advance();
        let statements = self.parse_braced_statements()?;
        Ok(Clause {
            statements,
            span: self.span_from(start),
        })
    }

    fn parse_braced_statements(&mut self) -> ParseResult<Vec<Statement>> {
        self.expect(Token::LeftBrace)?;
        let statements = self.parse_statement_list();
        self.expect(Token::RightBrace)?;
        Ok(statements)
    }

    /// Statements up to the closing `}`, each optionally followed by `;`.
    /// A statement that fails to parse becomes an error node.
    fn parse_statement_list(&mut self) -> Vec<Statement> {
        let mut statements = Vec::new();
        while !self.check(&Token::RightBrace) && !self.is_at_end() {
            if self.match_token(&Token::Semicolon) {
                continue;
            }
            let start = self.current;
            match self.parse_statement_internal() {
                Ok(statement) => statements.push(statement),
                Err(e) => {
                    let node = self.recover(e, start, statement_sync);
                    statements.push(Statement::Error(node));
                }
            }
            self.match_token(&Token::Semicolon);
        }
        statements
    }

    pub(super) fn parse_statement_internal(&mut self) -> ParseResult<Statement> {
        ensure_sufficient_stack(|| self.parse_statement_inner())
    }

    fn parse_statement_inner(&mut self) -> ParseResult<Statement> {
        let start = self.current_span().start;
        match self.current_token() {
            Some(Token::LeftBrace) => Ok(Statement::Block(self.parse_block()?)),
            Some(Token::Var) => Ok(Statement::Var(self.parse_value_decl(None, start)?)),
            Some(Token::Const) => Ok(Statement::Const(self.parse_value_decl(None, start)?)),
            Some(Token::Timer) => Ok(Statement::Timer(self.parse_timer_decl(None, start)?)),
            Some(Token::Port) => Ok(Statement::Port(self.parse_port_decl(None, start)?)),
            Some(Token::Template) => Ok(Statement::Template(Box::new(
                self.parse_template_def(None, start)?,
            ))),
            Some(Token::Label) => Ok(Statement::Label(self.parse_label_stmt()?)),
            Some(Token::Goto) => Ok(Statement::Goto(self.parse_label_stmt()?)),
            Some(Token::Break) => Ok(Statement::Break(self.parse_jump_stmt())),
            Some(Token::Continue) => Ok(Statement::Continue(self.parse_jump_stmt())),
            Some(Token::Return) => Ok(Statement::Return(self.parse_return_stmt())),
            Some(Token::If) => Ok(Statement::If(self.parse_if_stmt()?)),
            Some(Token::Select) => Ok(Statement::Select(self.parse_select_stmt()?)),
            Some(Token::For) => self.parse_for_stmt(),
            Some(Token::While) => Ok(Statement::While(self.parse_while_stmt()?)),
            Some(Token::Do) => Ok(Statement::DoWhile(self.parse_do_while_stmt()?)),
            Some(Token::Alt) => Ok(Statement::Alt(self.parse_alt_stmt()?)),
            Some(Token::Interleave) => Ok(Statement::Interleave(self.parse_alt_stmt()?)),
            Some(t) if starts_reference(t) => self.parse_reference_statement(),
            _ => Err(self.expected("statement")),
        }
    }

    /// A reference used as a statement, an assignment or a redirection
    fn parse_reference_statement(&mut self) -> ParseResult<Statement> {
        let reference = self.parse_reference()?;
        if self.match_token(&Token::Assign) {
            let value = self.parse_expression_internal()?;
            let span = reference.span().merge(value.span());
            return Ok(Statement::Assignment(Assignment {
                target: reference,
                value,
                span,
            }));
        }
        if self.check(&Token::Arrow) {
            return Ok(Statement::Redirection(self.parse_redirection(reference)?));
        }
        Ok(Statement::Reference(reference))
    }

    /// `-> value v sender s verdict d param p timestamp t @index value i`
    fn parse_redirection(&mut self, reference: Reference) -> ParseResult<Redirection> {
        let start = reference.span().start;
        self.expect(Token::Arrow)?;

        let value = self.parse_redirect_clause(|p| p.match_token(&Token::Value))?;
        let sender = self.parse_redirect_clause(|p| p.match_word("sender"))?;
        let verdict = self.parse_redirect_clause(|p| p.match_word("verdict"))?;
        let param = self.parse_redirect_clause(|p| p.match_word("param"))?;
        let timestamp = self.parse_redirect_clause(|p| p.match_word("timestamp"))?;
        let index_value = if self.match_modifier("@index") {
            self.expect(Token::Value)?;
            Some(self.parse_expression_internal()?)
        } else {
            None
        };

        Ok(Redirection {
            reference,
            value,
            sender,
            verdict,
            param,
            timestamp,
            index_value,
            span: self.span_from(start),
        })
    }

    fn parse_redirect_clause(
        &mut self,
        keyword: impl FnOnce(&mut Self) -> bool,
    ) -> ParseResult<Option<Expression>> {
        if keyword(self) {
            Ok(Some(self.parse_expression_internal()?))
        } else {
            Ok(None)
        }
    }

    /// `label L` or `goto L`
    fn parse_label_stmt(&mut self) -> ParseResult<LabelStmt> {
        let start = self.current_span().start;
        self.advance();
        let name = self.expect_identifier()?;
        Ok(LabelStmt {
            name,
            span: self.span_from(start),
        })
    }

    /// `break` or `continue`. The identifier after the keyword is its label
    /// only when the token after the identifier could end the statement;
    /// otherwise the identifier starts the next statement.
    fn parse_jump_stmt(&mut self) -> JumpStmt {
        let start = self.current_span().start;
        self.advance();
        let label = if self.check_identifier() && self.at_statement_boundary(1) {
            self.expect_identifier().ok()
        } else {
            if self.check_identifier() {
                trace!("identifier after jump keyword starts the next statement");
            }
            None
        };
        JumpStmt {
            label,
            span: self.span_from(start),
        }
    }

    /// `return` with an optional value. The value is kept only when the
    /// statement can end right after it.
    fn parse_return_stmt(&mut self) -> ReturnStmt {
        let start = self.current_span().start;
        self.advance();
        let value = if self.current_token().map(starts_operand).unwrap_or(false) {
            self.speculate(|p| {
                let value = p.parse_expression_internal()?;
                if p.at_statement_boundary(0) {
                    Ok(value)
                } else {
                    Err(p.expected("end of statement"))
                }
            })
        } else {
            None
        };
        ReturnStmt {
            value,
            span: self.span_from(start),
        }
    }

    /// Statement allowed before the condition of `if`, `while` and
    /// `select`, and as the init part of `for`
    fn parse_init_stmt(&mut self) -> ParseResult<Statement> {
        let start = self.current_span().start;
        match self.current_token() {
            Some(Token::Var) => Ok(Statement::Var(self.parse_value_decl(None, start)?)),
            Some(Token::Const) => Ok(Statement::Const(self.parse_value_decl(None, start)?)),
            Some(Token::Timer) => Ok(Statement::Timer(self.parse_timer_decl(None, start)?)),
            Some(Token::Port) => Ok(Statement::Port(self.parse_port_decl(None, start)?)),
            Some(Token::Template) => Ok(Statement::Template(Box::new(
                self.parse_template_def(None, start)?,
            ))),
            _ => {
                let target = self.parse_reference()?;
                self.expect(Token::Assign)?;
                let value = self.parse_expression_internal()?;
                let span = target.span().merge(value.span());
                Ok(Statement::Assignment(Assignment {
                    target,
                    value,
                    span,
                }))
            }
        }
    }

    /// Optional `init;` at the start of a parenthesized condition
    fn parse_condition_init(&mut self) -> Option<Box<Statement>> {
        self.speculate(|p| {
            let init = p.parse_init_stmt()?;
            p.expect(Token::Semicolon)?;
            Ok(Box::new(init))
        })
    }

    fn parse_if_stmt(&mut self) -> ParseResult<IfStmt> {
        let start = self.current_span().start;
        self.expect(Token::If)?;
        self.expect(Token::LeftParen)?;
        let init = self.parse_condition_init();
        let condition = self.parse_expression_internal()?;
        self.expect(Token::RightParen)?;
        let then_branch = self.parse_block()?;

        let else_branch = if self.match_token(&Token::Else) {
            if self.check(&Token::If) {
                Some(ElseBranch::If(Box::new(self.parse_if_stmt()?)))
            } else {
                Some(ElseBranch::Block(self.parse_block()?))
            }
        } else {
            None
        };

        Ok(IfStmt {
            init,
            condition,
            then_branch,
            else_branch,
            span: self.span_from(start),
        })
    }

    fn parse_select_stmt(&mut self) -> ParseResult<SelectStmt> {
        let start = self.current_span().start;
        self.expect(Token::Select)?;
        let kind = if self.match_token(&Token::Union) {
            SelectKind::Union
        } else if self.match_token(&Token::Class) {
            SelectKind::Class
        } else if self.match_token(&Token::Type) {
            SelectKind::Type
        } else {
            SelectKind::Plain
        };

        self.expect(Token::LeftParen)?;
        let init = self.parse_condition_init();
        let expression = self.parse_expression_internal()?;
        self.expect(Token::RightParen)?;

        let mut clauses = Vec::new();
        while self.check(&Token::Case) {
            if matches!(clauses.last(), Some(SelectClause::Else { .. })) {
                return Err(self.error("`case else` must be the last clause".to_string()));
            }
            clauses.push(self.parse_select_clause()?);
        }
        if clauses.is_empty() {
            return Err(self.expected("`case`"));
        }

        Ok(SelectStmt {
            kind,
            init,
            expression,
            clauses,
            span: self.span_from(start),
        })
    }

    fn parse_select_clause(&mut self) -> ParseResult<SelectClause> {
        let start = self.current_span().start;
        self.expect(Token::Case)?;
        if self.match_token(&Token::Else) {
            let body = self.parse_block()?;
            return Ok(SelectClause::Else {
                body,
                span: self.span_from(start),
            });
        }
        self.expect(Token::LeftParen)?;
        let expression = self.parse_expression_internal()?;
        self.expect(Token::RightParen)?;
        let body = self.parse_block()?;
        Ok(SelectClause::Case {
            expression,
            body,
            span: self.span_from(start),
        })
    }

    /// C-style `for`, or the range form when `(var|const)? name in`
    /// follows the parenthesis
    fn parse_for_stmt(&mut self) -> ParseResult<Statement> {
        let start = self.current_span().start;
        self.expect(Token::For)?;
        self.expect(Token::LeftParen)?;

        let skip = usize::from(matches!(self.current_token(), Some(Token::Var) | Some(Token::Const)));
        let is_range = matches!(self.peek(skip), Some(Token::Identifier(_)))
            && self.peek_is(skip + 1, &Token::In);
        if is_range {
            let binding = if self.match_token(&Token::Var) {
                Some(RangeBinding::Var)
            } else if self.match_token(&Token::Const) {
                Some(RangeBinding::Const)
            } else {
                None
            };
            let name = self.expect_identifier()?;
            self.expect(Token::In)?;
            let range = self.parse_expression_internal()?;
            self.expect(Token::RightParen)?;
            let body = self.parse_block()?;
            return Ok(Statement::ForRange(ForRangeStmt {
                binding,
                name,
                range,
                body,
                span: self.span_from(start),
            }));
        }

        let init = if self.check(&Token::Semicolon) {
            None
        } else {
            Some(Box::new(self.parse_init_stmt()?))
        };
        self.expect(Token::Semicolon)?;
        let condition = if self.check(&Token::Semicolon) {
            None
        } else {
            Some(self.parse_expression_internal()?)
        };
        self.expect(Token::Semicolon)?;
        let post = if self.check(&Token::RightParen) {
            None
        } else {
            Some(Box::new(self.parse_statement_internal()?))
        };
        self.expect(Token::RightParen)?;
        let body = self.parse_block()?;

        Ok(Statement::For(ForStmt {
            init,
            condition,
            post,
            body,
            span: self.span_from(start),
        }))
    }

    fn parse_while_stmt(&mut self) -> ParseResult<WhileStmt> {
        let start = self.current_span().start;
        self.expect(Token::While)?;
        self.expect(Token::LeftParen)?;
        let init = self.parse_condition_init();
        let condition = self.parse_expression_internal()?;
        self.expect(Token::RightParen)?;
        let body = self.parse_block()?;
        Ok(WhileStmt {
            init,
            condition,
            body,
            span: self.span_from(start),
        })
    }

    fn parse_do_while_stmt(&mut self) -> ParseResult<DoWhileStmt> {
        let start = self.current_span().start;
        self.expect(Token::Do)?;
        let body = self.parse_block()?;
        self.expect(Token::While)?;
        self.expect(Token::LeftParen)?;
        let condition = self.parse_expression_internal()?;
        self.expect(Token::RightParen)?;
        Ok(DoWhileStmt {
            body,
            condition,
            span: self.span_from(start),
        })
    }

    /// `alt` or `interleave`, with an optional `@nodefault`
    fn parse_alt_stmt(&mut self) -> ParseResult<AltStmt> {
        let start = self.current_span().start;
        self.advance();
        let nodefault = self.match_modifier("@nodefault");
        let body = self.parse_alt_block()?;
        Ok(AltStmt {
            nodefault,
            body,
            span: self.span_from(start),
        })
    }

    /// `{ declarations and guarded branches } catch {...} finally {...}`
    pub(super) fn parse_alt_block(&mut self) -> ParseResult<AltBlock> {
        let start = self.current_span().start;
        self.expect(Token::LeftBrace)?;

        let mut items = Vec::new();
        while !self.check(&Token::RightBrace) && !self.is_at_end() {
            if self.match_token(&Token::Semicolon) {
                continue;
            }
            let item_start = self.current;
            match self.parse_alt_item() {
                Ok(item) => items.push(item),
                Err(e) => {
                    let node = self.recover(e, item_start, alt_item_sync);
                    items.push(AltItem::Error(node));
                }
            }
            self.match_token(&Token::Semicolon);
        }
        self.expect(Token::RightBrace)?;

        let mut catches = Vec::new();
        while self.check(&Token::Catch) {
            catches.push(self.parse_clause()?);
        }
        let finally = if self.check(&Token::Finally) {
            Some(self.parse_clause()?)
        } else {
            None
        };

        Ok(AltBlock {
            items,
            catches,
            finally,
            span: self.span_from(start),
        })
    }

    fn parse_alt_item(&mut self) -> ParseResult<AltItem> {
        let start = self.current_span().start;
        match self.current_token() {
            Some(Token::Var) => Ok(AltItem::Var(self.parse_value_decl(None, start)?)),
            Some(Token::Const) => Ok(AltItem::Const(self.parse_value_decl(None, start)?)),
            Some(Token::Timer) => Ok(AltItem::Timer(self.parse_timer_decl(None, start)?)),
            Some(Token::Port) => Ok(AltItem::Port(self.parse_port_decl(None, start)?)),
            Some(Token::Template) => Ok(AltItem::Template(Box::new(
                self.parse_template_def(None, start)?,
            ))),
            Some(Token::LeftBracket) => self.parse_guarded_item(),
            _ => Err(self.expected("`[` or a declaration")),
        }
    }

    /// `[guard] communication body?` or `[else] body`
    fn parse_guarded_item(&mut self) -> ParseResult<AltItem> {
        let start = self.current_span().start;
        self.expect(Token::LeftBracket)?;

        if self.match_token(&Token::Else) {
            self.expect(Token::RightBracket)?;
            let body = self.parse_block()?;
            return Ok(AltItem::Else(GuardedElse {
                body,
                span: self.span_from(start),
            }));
        }

        let condition = if self.check(&Token::RightBracket) {
            None
        } else {
            Some(self.parse_expression_internal()?)
        };
        self.expect(Token::RightBracket)?;

        let saved = std::mem::replace(&mut self.alt_guard_mode, true);
        let stmt = self.parse_communication();
        self.alt_guard_mode = saved;
        let stmt = stmt?;

        let body = if self.check(&Token::LeftBrace) {
            Some(self.parse_block()?)
        } else {
            None
        };

        Ok(AltItem::Guarded(GuardedStmt {
            condition,
            stmt,
            body,
            span: self.span_from(start),
        }))
    }

    fn parse_communication(&mut self) -> ParseResult<Communication> {
        let reference = self.parse_reference()?;
        if self.check(&Token::Arrow) {
            Ok(Communication::Redirection(self.parse_redirection(reference)?))
        } else {
            Ok(Communication::Reference(reference))
        }
    }
}

/// Tokens an alt block resynchronizes on
fn alt_item_sync(token: &Token) -> bool {
    matches!(
        token,
        Token::LeftBracket | Token::Var | Token::Const | Token::Timer | Token::Port | Token::Template
    )
}
