use super::*;

impl<'a> Parser<'a> {
    /* Expressions */
    /// Parses an expression whose binary operators all bind tighter than `parent_precedence`.
    /// Use `0` to accept any expression.
    pub fn parse_expression(&mut self, parent_precedence: u8) -> Node {
        self.nested(|parser| parser.parse_operator_expression(parent_precedence))
    }

    fn parse_operator_expression(&mut self, parent_precedence: u8) -> Node {
        let unary_precedence = self.current().kind.unary_precedence();

        let mut left = if unary_precedence != 0 && unary_precedence >= parent_precedence {
            let op = self.next();
            let operand = self.parse_expression(unary_precedence);
            Node::Unary {
                op,
                operand: Box::new(operand),
            }
        } else {
            self.parse_primary_expression()
        };

        // Every operator of a chain nests the tree built so far one level deeper.
        let depth = self.depth;
        loop {
            let precedence = self.current().kind.binary_precedence();
            if precedence == 0 || precedence <= parent_precedence {
                break; // not a binary operator or binds looser than the caller, stop parsing
            }
            if self.depth >= MAX_NESTING {
                self.depth = depth;
                return self.nesting_too_deep();
            }
            self.depth += 1;

            let op = self.next();
            let right = self.parse_expression(precedence);

            left = Node::Binary {
                left: Box::new(left),
                op,
                right: Box::new(right),
            };
        }

        self.depth = depth;
        left
    }

    /// Parses a primary (atom) expression.
    fn parse_primary_expression(&mut self) -> Node {
        match self.current().kind {
            TokenKind::Number => self.parse_number_literal(),
            TokenKind::True | TokenKind::False => {
                let token = self.next();
                Node::Boolean {
                    value: token.kind == TokenKind::True,
                    token,
                }
            }
            TokenKind::LParen => self.parse_parenthesized_expression(),
            TokenKind::Ident => {
                let lookahead = self.peek(1).kind;
                if lookahead.is_assignment() {
                    self.parse_assignment_expression()
                } else if lookahead == TokenKind::Colon {
                    self.parse_typed_assignment_expression()
                } else {
                    Node::Identifier { token: self.next() }
                }
            }
            kind => {
                let node = self.error_node();
                self.unexpected("expression");
                // Closing delimiters are left for the enclosing construct.
                if !matches!(kind, TokenKind::Eof | TokenKind::RParen | TokenKind::RBrace) {
                    self.next();
                }
                node
            }
        }
    }

    /* Expressions.Literals */
    fn parse_number_literal(&mut self) -> Node {
        let token = self.next();
        match token.text.parse::<i64>() {
            Ok(value) => Node::Number { token, value },
            Err(_) => {
                self.source.error(
                    token.location.clone(),
                    format!("integer literal {} is out of range", token.text),
                );
                Node::Error {
                    location: token.location,
                }
            }
        }
    }

    fn parse_parenthesized_expression(&mut self) -> Node {
        self.nested(|parser| {
            let lparen = parser.expect(TokenKind::LParen);
            let inner = parser.parse_expression(0);
            let rparen = parser.expect(TokenKind::RParen);
            Node::Parenthesized {
                lparen,
                inner: Box::new(inner),
                rparen,
            }
        })
    }

    /* Expressions.Assignment */
    /// Parses `x = e` or a compound assignment such as `x += e`.
    fn parse_assignment_expression(&mut self) -> Node {
        let identifier = self.expect(TokenKind::Ident);
        let op = self.next();
        let right = self.parse_expression(0);
        Node::Assignment {
            identifier,
            annotation: None,
            op,
            right: Box::new(right),
        }
    }

    /// Parses `x: int = e` or `x: bool = e`.
    fn parse_typed_assignment_expression(&mut self) -> Node {
        let identifier = self.expect(TokenKind::Ident);
        let colon = self.expect(TokenKind::Colon);
        let ty = if self.current().kind.is_type() {
            self.next()
        } else {
            self.unexpected("type");
            let placeholder = self.placeholder();
            // Skip an unknown type name so that the `=` still lines up.
            self.eat(TokenKind::Ident);
            placeholder
        };
        let op = self.expect(TokenKind::Assign);
        let right = self.parse_expression(0);
        Node::Assignment {
            identifier,
            annotation: Some(TypeAnnotation { colon, ty }),
            op,
            right: Box::new(right),
        }
    }
}
