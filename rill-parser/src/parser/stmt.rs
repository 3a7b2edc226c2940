use super::*;

impl<'a> Parser<'a> {
    /// Parses a statement.
    pub fn parse_statement(&mut self) -> Node {
        self.nested(|parser| {
            let kind = parser.current().kind;
            log::trace!("statement starting with {}", kind);
            match kind {
                TokenKind::If => parser.parse_if_statement(),
                TokenKind::LBrace => parser.parse_block_statement(),
                TokenKind::Int | TokenKind::Bool => parser.parse_typed_declaration(),
                TokenKind::Ident if parser.peek(1).kind == TokenKind::Declare => {
                    parser.parse_declaration()
                }
                _ => parser.parse_expression(0), // expression statement
            }
        })
    }

    pub fn parse_block_statement(&mut self) -> Node {
        let lbrace = self.expect(TokenKind::LBrace);
        let statements = self.parse_statement_list(TokenKind::RBrace);
        let rbrace = self.expect(TokenKind::RBrace);
        Node::Block {
            lbrace,
            statements,
            rbrace,
        }
    }

    /// Parses statements up to `terminator` or the end of file, without consuming either.
    pub(super) fn parse_statement_list(&mut self, terminator: TokenKind) -> Vec<Node> {
        let mut statements = Vec::new();
        while !self.at(terminator) && !self.at(TokenKind::Eof) {
            let consumed = self.consumed;
            statements.push(self.parse_statement());

            if self.consumed == consumed {
                // Nothing could be parsed, skip the offending token.
                let skipped = self.next();
                log::debug!("skipping {} at {}", skipped, skipped.location.start);
            }
        }
        statements
    }

    fn parse_if_statement(&mut self) -> Node {
        let if_token = self.expect(TokenKind::If);
        let condition = self.parse_expression(0);
        let body = self.parse_statement();

        // `else if` chains go through `parse_statement` so that they count towards the nesting.
        let else_clause = self.eat(TokenKind::Else).map(|else_token| {
            let body = self.parse_statement();
            Box::new(Node::Else {
                else_token,
                body: Box::new(body),
            })
        });

        Node::If {
            if_token,
            condition: Box::new(condition),
            body: Box::new(body),
            else_clause,
        }
    }

    /// Parses `x := e`.
    fn parse_declaration(&mut self) -> Node {
        let identifier = self.expect(TokenKind::Ident);
        let op = self.expect(TokenKind::Declare);
        let initializer = self.parse_expression(0);
        Node::VariableDeclaration {
            ty: None,
            identifier,
            op,
            initializer: Box::new(initializer),
        }
    }

    /// Parses `int x = e` or `bool x = e`.
    fn parse_typed_declaration(&mut self) -> Node {
        let ty = self.next();
        let identifier = self.expect(TokenKind::Ident);
        let op = self.expect(TokenKind::Assign);
        let initializer = self.parse_expression(0);
        Node::VariableDeclaration {
            ty: Some(ty),
            identifier,
            op,
            initializer: Box::new(initializer),
        }
    }
}
