//! Production graph of the Pascal subset
//!
//! Every named production is declared up front so productions can refer to
//! each other in any order; the sections below then define them. Marker
//! placement here is what later stages query for.

use super::rule::{Grammar, GrammarError, Rule};
use crate::ast::Marker;
use crate::log_success;
use crate::logging::codes;
use crate::tokens::TokenId;

impl Grammar {
    /// Build and validate the full language grammar, rooted at `program`
    pub fn pascal() -> Result<Grammar, GrammarError> {
        let mut g = Grammar::new();

        let program = g.declare("program");
        let block = g.declare("block");

        let constants = g.declare("constants");
        let constant_definition = g.declare("constant-definition");
        let constant = g.declare("constant");
        let sign = g.declare("sign");

        let types = g.declare("types");
        let type_definition = g.declare("type-definition");
        let type_name = g.declare("type");

        let variables = g.declare("variables");
        let same_type_variables = g.declare("same-type-variables");
        let variable = g.declare("variable");

        let functions = g.declare("functions");
        let function_definition = g.declare("function-definition");
        let function_header = g.declare("function-header");
        let function_name = g.declare("function-name");
        let function_return_type = g.declare("function-return-type");
        let parameter_group = g.declare("parameter-group");
        let formal_parameters = g.declare("formal-parameters");
        let factual_parameter = g.declare("factual-parameter");
        let function_usage = g.declare("function-usage");

        let expression = g.declare("expression");
        let simple_expression = g.declare("simple-expression");
        let relation_operation = g.declare("relation-operation");
        let additive_operation = g.declare("additive-operation");
        let additive_operand = g.declare("additive-operand");
        let multiplicative_operation = g.declare("multiplicative-operation");
        let multiplicative_operand = g.declare("multiplicative-operand");

        let operators = g.declare("operators");
        let operator = g.declare("operator");
        let simple_operator = g.declare("simple-operator");
        let complex_operator = g.declare("complex-operator");
        let composite_operator = g.declare("composite-operator");
        let assignment_operator = g.declare("assignment-operator");
        let condition_operator = g.declare("condition-operator");
        let loop_operator = g.declare("loop-operator");
        let if_operator = g.declare("if");
        let for_operator = g.declare("for");
        let direction = g.declare("direction");
        let while_operator = g.declare("while");
        let repeat_operator = g.declare("repeat");

        // Conditions

        let if_keyword = g.token(TokenId::If);
        let if_condition = g.add(Rule::sequence(vec![expression]).marked([Marker::IfExpr]));
        let then_keyword = g.token(TokenId::Then);
        let then_branch = g.add(Rule::sequence(vec![operator]).marked([Marker::Block]));
        let else_keyword = g.token(TokenId::Else);
        let else_branch = g.add(Rule::sequence(vec![operator]).marked([Marker::Block]));
        let else_clause = g.sequence(vec![else_keyword, else_branch]);
        let optional_else = g.optional(else_clause);
        g.define(
            if_operator,
            Rule::sequence(vec![if_keyword, if_condition, then_keyword, then_branch, optional_else])
                .marked([Marker::If]),
        )?;

        // Constants

        let plus = g.token(TokenId::Plus);
        let minus = g.token(TokenId::Minus);
        let plus_or_minus = g.either(vec![plus, minus]);
        g.define(sign, Rule::optional(plus_or_minus))?;

        let int_literal = g.token(TokenId::IntLiteral);
        let double_literal = g.token(TokenId::DoubleLiteral);
        let bool_literal = g.token(TokenId::BoolLiteral);
        let number = g.either(vec![int_literal, double_literal]);
        let named_constant = g.token(TokenId::UserDefined);
        let unsigned = g.either(vec![number, named_constant]);
        let signed = g.sequence(vec![sign, unsigned]);
        g.define(
            constant,
            Rule::either(vec![signed, bool_literal]).marked([Marker::Value]),
        )?;

        let constant_name = g.marked_token(TokenId::UserDefined, [Marker::Name]);
        let constant_eq = g.token(TokenId::Eq);
        g.define(
            constant_definition,
            Rule::sequence(vec![constant_name, constant_eq, constant]).marked([Marker::ConstDecl]),
        )?;

        let const_keyword = g.token(TokenId::Const);
        let const_semicolon = g.token(TokenId::Semicolon);
        let more_constant = g.sequence(vec![constant_definition, const_semicolon]);
        let more_constants = g.several(more_constant);
        let constant_section = g.sequence(vec![
            const_keyword,
            constant_definition,
            const_semicolon,
            more_constants,
        ]);
        g.define(constants, Rule::optional(constant_section))?;

        // Expressions

        let relation = g.sequence(vec![relation_operation, simple_expression]);
        let optional_relation = g.optional(relation);
        g.define(
            expression,
            Rule::sequence(vec![simple_expression, optional_relation]).marked([Marker::Expr]),
        )?;

        let additive_tail = g.sequence(vec![additive_operation, additive_operand]);
        let additive_tails =
            g.add(Rule::several(additive_tail).marked([Marker::AdditionalOperands]));
        g.define(
            simple_expression,
            Rule::sequence(vec![sign, additive_operand, additive_tails]),
        )?;

        let comparisons: Vec<_> = [
            TokenId::Eq,
            TokenId::Ne,
            TokenId::Lt,
            TokenId::Lte,
            TokenId::Gt,
            TokenId::Gte,
            TokenId::In,
        ]
        .into_iter()
        .map(|id| g.token(id))
        .collect();
        g.define(
            relation_operation,
            Rule::either(comparisons).marked([Marker::CompareOp]),
        )?;

        let add = g.marked_token(TokenId::Plus, [Marker::AdditiveOp]);
        let subtract = g.marked_token(TokenId::Minus, [Marker::AdditiveOp]);
        let or = g.marked_token(TokenId::Or, [Marker::LogicOp]);
        g.define(additive_operation, Rule::either(vec![add, subtract, or]))?;

        let multiplicative_tail = g.sequence(vec![multiplicative_operation, multiplicative_operand]);
        let multiplicative_tails =
            g.add(Rule::several(multiplicative_tail).marked([Marker::AdditionalOperands]));
        g.define(
            additive_operand,
            Rule::sequence(vec![multiplicative_operand, multiplicative_tails]),
        )?;

        let multiply = g.marked_token(TokenId::Multiply, [Marker::MultiplicativeOp]);
        let divide = g.marked_token(TokenId::Divide, [Marker::MultiplicativeOp]);
        let div = g.marked_token(TokenId::Div, [Marker::MultiplicativeOp]);
        let modulo = g.marked_token(TokenId::Mod, [Marker::MultiplicativeOp]);
        let and = g.marked_token(TokenId::And, [Marker::LogicOp]);
        g.define(
            multiplicative_operation,
            Rule::either(vec![multiply, divide, div, modulo, and]),
        )?;

        let open_paren = g.token(TokenId::OpeningParenthesis);
        let close_paren = g.token(TokenId::ClosingParenthesis);
        let parenthesized = g.sequence(vec![open_paren, expression, close_paren]);
        let not_keyword = g.token(TokenId::Not);
        let negated = g.sequence(vec![not_keyword, multiplicative_operand]);
        g.define(
            multiplicative_operand,
            Rule::either(vec![function_usage, variable, constant, parenthesized, negated]),
        )?;

        // Functions

        g.define(functions, Rule::several(function_definition))?;
        g.define(
            function_return_type,
            Rule::sequence(vec![type_name]).marked([Marker::ReturnType]),
        )?;
        g.define(
            function_name,
            Rule::token(TokenId::UserDefined).marked([Marker::Name, Marker::FuncName]),
        )?;

        let parameter_name = g.marked_token(TokenId::UserDefined, [Marker::Name]);
        let parameter_comma = g.token(TokenId::Comma);
        let more_parameter = g.sequence(vec![parameter_comma, parameter_name]);
        let more_parameters = g.several(more_parameter);
        let parameter_colon = g.token(TokenId::Colon);
        g.define(
            parameter_group,
            Rule::sequence(vec![parameter_name, more_parameters, parameter_colon, type_name])
                .marked([Marker::ParamGroupDecl]),
        )?;

        let var_keyword = g.token(TokenId::Var);
        let var_group = g.sequence(vec![var_keyword, parameter_group]);
        let function_keyword = g.token(TokenId::Function);
        let function_group = g.sequence(vec![function_keyword, parameter_group]);
        g.define(
            formal_parameters,
            Rule::either(vec![parameter_group, var_group, function_group]),
        )?;

        g.define(
            factual_parameter,
            Rule::either(vec![expression, variable, function_name]).marked([Marker::FuncArg]),
        )?;

        let header_semicolon = g.token(TokenId::Semicolon);
        let more_formal = g.sequence(vec![header_semicolon, formal_parameters]);
        let more_formals = g.several(more_formal);
        let formal_list = g.sequence(vec![formal_parameters, more_formals]);
        let optional_formal_list = g.optional(formal_list);
        let formal_parens = g.sequence(vec![open_paren, optional_formal_list, close_paren]);
        let optional_formal_parens = g.optional(formal_parens);
        let return_colon = g.token(TokenId::Colon);
        g.define(
            function_header,
            Rule::sequence(vec![
                function_keyword,
                function_name,
                optional_formal_parens,
                return_colon,
                function_return_type,
                header_semicolon,
            ])
            .marked([Marker::FuncDecl]),
        )?;

        g.define(
            function_definition,
            Rule::sequence(vec![function_header, block]),
        )?;

        let argument_comma = g.token(TokenId::Comma);
        let more_argument = g.sequence(vec![argument_comma, factual_parameter]);
        let more_arguments = g.several(more_argument);
        let argument_list = g.sequence(vec![factual_parameter, more_arguments]);
        let optional_argument_list = g.optional(argument_list);
        let argument_parens = g.sequence(vec![open_paren, optional_argument_list, close_paren]);
        let optional_argument_parens = g.optional(argument_parens);
        g.define(
            function_usage,
            Rule::sequence(vec![function_name, optional_argument_parens]).marked([Marker::FuncCall]),
        )?;

        // Loops

        let while_keyword = g.token(TokenId::While);
        let while_condition = g.add(Rule::sequence(vec![expression]).marked([Marker::WhileExpr]));
        let do_keyword = g.token(TokenId::Do);
        let loop_body = g.add(Rule::sequence(vec![operator]).marked([Marker::Block]));
        g.define(
            while_operator,
            Rule::sequence(vec![while_keyword, while_condition, do_keyword, loop_body])
                .marked([Marker::While]),
        )?;

        let repeat_keyword = g.token(TokenId::Repeat);
        let repeat_semicolon = g.token(TokenId::Semicolon);
        let more_repeated = g.sequence(vec![repeat_semicolon, operator]);
        let more_repeated_operators = g.several(more_repeated);
        let repeat_body = g.add(
            Rule::sequence(vec![operator, more_repeated_operators]).marked([Marker::Block]),
        );
        let until_keyword = g.token(TokenId::Until);
        let repeat_condition =
            g.add(Rule::sequence(vec![expression]).marked([Marker::RepeatExpr]));
        g.define(
            repeat_operator,
            Rule::sequence(vec![repeat_keyword, repeat_body, until_keyword, repeat_condition])
                .marked([Marker::Repeat]),
        )?;

        let to = g.token(TokenId::To);
        let downto = g.token(TokenId::Downto);
        g.define(direction, Rule::either(vec![to, downto]))?;

        let for_keyword = g.token(TokenId::For);
        let counter = g.marked_token(TokenId::UserDefined, [Marker::Name]);
        let for_assign = g.token(TokenId::Assign);
        let for_header = g.add(
            Rule::sequence(vec![counter, for_assign, expression, direction, expression])
                .marked([Marker::ForHeader]),
        );
        g.define(
            for_operator,
            Rule::sequence(vec![for_keyword, for_header, do_keyword, loop_body])
                .marked([Marker::For]),
        )?;

        // Operators

        g.define(
            simple_operator,
            Rule::either(vec![assignment_operator, function_usage]),
        )?;
        g.define(condition_operator, Rule::either(vec![if_operator]))?;
        g.define(
            loop_operator,
            Rule::either(vec![for_operator, while_operator, repeat_operator]),
        )?;

        let simple_or_complex = g.either(vec![simple_operator, complex_operator]);
        g.define(operator, Rule::optional(simple_or_complex))?;

        let begin_keyword = g.token(TokenId::Begin);
        let statement_semicolon = g.token(TokenId::Semicolon);
        let more_statement = g.sequence(vec![statement_semicolon, operator]);
        let more_statements = g.several(more_statement);
        let end_keyword = g.token(TokenId::End);
        g.define(
            composite_operator,
            Rule::sequence(vec![begin_keyword, operator, more_statements, end_keyword])
                .marked([Marker::Block]),
        )?;

        g.define(
            complex_operator,
            Rule::either(vec![
                composite_operator,
                assignment_operator,
                condition_operator,
                loop_operator,
            ]),
        )?;

        let left_side = g.add(Rule::either(vec![variable, function_name]).marked([Marker::LeftSide]));
        let assign = g.token(TokenId::Assign);
        let right_side = g.add(Rule::sequence(vec![expression]).marked([Marker::RightSide]));
        g.define(
            assignment_operator,
            Rule::sequence(vec![left_side, assign, right_side]).marked([Marker::Assign]),
        )?;

        g.define(
            operators,
            Rule::sequence(vec![composite_operator]).marked([Marker::Operators]),
        )?;

        // Types

        g.define(
            type_name,
            Rule::token(TokenId::UserDefined).marked([Marker::Type]),
        )?;

        let type_alias = g.marked_token(TokenId::UserDefined, [Marker::Name]);
        let type_eq = g.token(TokenId::Eq);
        g.define(
            type_definition,
            Rule::sequence(vec![type_alias, type_eq, type_name]).marked([Marker::TypeDecl]),
        )?;

        let type_keyword = g.token(TokenId::Type);
        let type_semicolon = g.token(TokenId::Semicolon);
        let more_type = g.sequence(vec![type_definition, type_semicolon]);
        let more_types = g.several(more_type);
        let type_section = g.sequence(vec![type_keyword, type_definition, type_semicolon, more_types]);
        g.define(types, Rule::optional(type_section))?;

        // Variables

        g.define(variable, Rule::token(TokenId::UserDefined))?;

        let variable_name = g.marked_token(TokenId::UserDefined, [Marker::Name]);
        let variable_comma = g.token(TokenId::Comma);
        let more_variable = g.sequence(vec![variable_comma, variable_name]);
        let more_variables = g.several(more_variable);
        let variable_colon = g.token(TokenId::Colon);
        g.define(
            same_type_variables,
            Rule::sequence(vec![variable_name, more_variables, variable_colon, type_name])
                .marked([Marker::VarDecl]),
        )?;

        let variable_semicolon = g.token(TokenId::Semicolon);
        let more_declaration = g.sequence(vec![same_type_variables, variable_semicolon]);
        let more_declarations = g.several(more_declaration);
        let variable_section = g.sequence(vec![
            var_keyword,
            same_type_variables,
            variable_semicolon,
            more_declarations,
        ]);
        g.define(variables, Rule::optional(variable_section))?;

        // Program

        let declarations = g.add(
            Rule::sequence(vec![constants, types, variables, functions])
                .marked([Marker::Declarations]),
        );
        g.define(block, Rule::sequence(vec![declarations, operators]))?;

        let program_keyword = g.token(TokenId::Program);
        let program_name = g.marked_token(TokenId::UserDefined, [Marker::Name]);
        let program_semicolon = g.token(TokenId::Semicolon);
        let program_block = g.add(Rule::sequence(vec![block]).marked([Marker::ProgramBlock]));
        let period = g.token(TokenId::Period);
        let eof = g.token(TokenId::Eof);
        g.define(
            program,
            Rule::sequence(vec![
                program_keyword,
                program_name,
                program_semicolon,
                program_block,
                period,
                eof,
            ]),
        )?;

        g.set_root(program);
        g.validate()?;

        log_success!(codes::success::GRAMMAR_CONSTRUCTED, "Grammar constructed",
            "rules" => g.len()
        );

        Ok(g)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Node, QueryType};
    use crate::grammar::{BuildContext, Outcome, RuleId};
    use crate::neutralizer::Neutralizer;
    use crate::tokens::{TokenBuilder, TxChannel};
    use assert_matches::assert_matches;

    fn parse_rule(rule: &str, builder: TokenBuilder) -> Outcome {
        let grammar = Grammar::pascal().unwrap();
        let id = grammar.rule_by_name(rule).unwrap();
        let mut channel = TxChannel::new(builder.build());
        BuildContext::new(&grammar, Neutralizer::new(1)).build(id, &mut channel)
    }

    fn parsed(rule: &str, builder: TokenBuilder) -> Node {
        match parse_rule(rule, builder) {
            Outcome::Matched(Some(node)) => node,
            other => panic!("{} did not match: {:?}", rule, other),
        }
    }

    #[test]
    fn test_grammar_is_valid() {
        let grammar = Grammar::pascal().unwrap();
        assert_eq!(grammar.root(), grammar.rule_by_name("program"));
        assert!(grammar.validate().is_ok());
        assert!(grammar.len() > 100);
    }

    #[test]
    fn test_rule_names_resolve() {
        let grammar = Grammar::pascal().unwrap();
        for name in ["expression", "if", "for", "while", "repeat", "function-header", "block"] {
            let id: Option<RuleId> = grammar.rule_by_name(name);
            assert!(id.is_some(), "missing rule {}", name);
        }
        assert!(grammar.rule_by_name("nonexistent").is_none());
    }

    #[test]
    fn test_expression_markers() {
        let node = parsed(
            "expression",
            TokenBuilder::new()
                .ident("a")
                .id(TokenId::Plus)
                .int("2")
                .id(TokenId::Multiply)
                .ident("b")
                .id(TokenId::Lt)
                .int("10"),
        );

        assert!(node.has(Marker::Expr));
        assert_eq!(node.query(QueryType::Recursive, &[Marker::AdditiveOp]).len(), 1);
        assert_eq!(node.query(QueryType::Recursive, &[Marker::MultiplicativeOp]).len(), 1);
        assert_eq!(node.query(QueryType::Recursive, &[Marker::CompareOp]).len(), 1);
        assert_eq!(node.query(QueryType::Recursive, &[Marker::Value]).len(), 2);
    }

    #[test]
    fn test_if_with_else() {
        let node = parsed(
            "if",
            TokenBuilder::new()
                .id(TokenId::If)
                .ident("flag")
                .id(TokenId::Then)
                .ident("x")
                .id(TokenId::Assign)
                .int("1")
                .id(TokenId::Else)
                .ident("x")
                .id(TokenId::Assign)
                .int("2"),
        );

        assert!(node.has(Marker::If));
        assert_eq!(node.query(QueryType::Top, &[Marker::IfExpr]).len(), 1);
        assert_eq!(node.query(QueryType::Top, &[Marker::Block]).len(), 2);
        assert_eq!(node.query(QueryType::Recursive, &[Marker::Assign]).len(), 2);
    }

    #[test]
    fn test_for_loop() {
        let node = parsed(
            "for",
            TokenBuilder::new()
                .id(TokenId::For)
                .ident("i")
                .id(TokenId::Assign)
                .int("1")
                .id(TokenId::To)
                .int("10")
                .id(TokenId::Do)
                .ident("total")
                .id(TokenId::Assign)
                .ident("total")
                .id(TokenId::Plus)
                .ident("i"),
        );

        assert!(node.has(Marker::For));
        let header = node.find(Marker::ForHeader).unwrap();
        assert_eq!(header.find(Marker::Name).and_then(Node::as_token).map(|t| t.text()), Some("i"));
        assert_eq!(node.query(QueryType::Recursive, &[Marker::Assign]).len(), 1);
    }

    #[test]
    fn test_while_loop() {
        let node = parsed(
            "while",
            TokenBuilder::new()
                .id(TokenId::While)
                .id(TokenId::Not)
                .ident("b")
                .id(TokenId::Do)
                .ident("f")
                .id(TokenId::OpeningParenthesis)
                .ident("x")
                .id(TokenId::Comma)
                .text(TokenId::DoubleLiteral, "2.5")
                .id(TokenId::ClosingParenthesis),
        );

        assert!(node.has(Marker::While));
        assert_eq!(node.query(QueryType::Top, &[Marker::WhileExpr]).len(), 1);
        let condition = node.find(Marker::WhileExpr).unwrap();
        let condition_ids: Vec<TokenId> = condition.tokens().iter().map(|t| t.id).collect();
        assert_eq!(condition_ids, vec![TokenId::Not, TokenId::UserDefined]);

        let body = node.query(QueryType::Top, &[Marker::Block]);
        assert_eq!(body.len(), 1);
        let call = body[0].find(Marker::FuncCall).unwrap();
        assert_eq!(call.tokens()[0].text(), "f");
        assert_eq!(call.query(QueryType::Top, &[Marker::FuncArg]).len(), 2);
        assert!(node.find(Marker::Assign).is_none());
    }

    #[test]
    fn test_for_downto_with_bool_constant() {
        let node = parsed(
            "for",
            TokenBuilder::new()
                .id(TokenId::For)
                .ident("i")
                .id(TokenId::Assign)
                .int("3")
                .id(TokenId::Downto)
                .int("1")
                .id(TokenId::Do)
                .ident("y")
                .id(TokenId::Assign)
                .text(TokenId::BoolLiteral, "true"),
        );

        assert!(node.has(Marker::For));
        let header = node.find(Marker::ForHeader).unwrap();
        assert!(header.tokens().iter().any(|t| t.id == TokenId::Downto));
        assert_eq!(header.query(QueryType::Recursive, &[Marker::Value]).len(), 2);

        let assignments = node.query(QueryType::Recursive, &[Marker::Assign]);
        assert_eq!(assignments.len(), 1);
        let value = assignments[0].find(Marker::Value).and_then(Node::as_token).unwrap();
        assert_eq!(value.id, TokenId::BoolLiteral);
        assert_eq!(value.text(), "true");
    }

    #[test]
    fn test_not_operand() {
        let node = parsed(
            "multiplicative-operand",
            TokenBuilder::new().id(TokenId::Not).id(TokenId::Not).ident("done"),
        );

        let ids: Vec<TokenId> = node.tokens().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![TokenId::Not, TokenId::Not, TokenId::UserDefined]);
    }

    #[test]
    fn test_procedure_call_statement() {
        let node = parsed(
            "operator",
            TokenBuilder::new()
                .ident("writeln")
                .id(TokenId::OpeningParenthesis)
                .ident("x")
                .id(TokenId::Comma)
                .text(TokenId::DoubleLiteral, "2.5")
                .id(TokenId::ClosingParenthesis),
        );

        assert!(node.has(Marker::FuncCall));
        assert!(node.find(Marker::Assign).is_none());
        let name = node.find(Marker::FuncName).and_then(Node::as_token).unwrap();
        assert_eq!(name.text(), "writeln");

        let arguments = node.query(QueryType::Top, &[Marker::FuncArg]);
        assert_eq!(arguments.len(), 2);
        let constant = arguments[1].find(Marker::Value).and_then(Node::as_token).unwrap();
        assert_eq!(constant.id, TokenId::DoubleLiteral);
        assert_eq!(constant.text(), "2.5");
    }

    #[test]
    fn test_repeat_loop() {
        let node = parsed(
            "repeat",
            TokenBuilder::new()
                .id(TokenId::Repeat)
                .ident("x")
                .id(TokenId::Assign)
                .int("1")
                .id(TokenId::Semicolon)
                .ident("y")
                .id(TokenId::Assign)
                .int("2")
                .id(TokenId::Until)
                .ident("done"),
        );

        assert!(node.has(Marker::Repeat));
        assert_eq!(node.query(QueryType::Recursive, &[Marker::Assign]).len(), 2);
        assert!(node.find(Marker::RepeatExpr).is_some());
    }

    #[test]
    fn test_function_header() {
        let node = parsed(
            "function-header",
            TokenBuilder::new()
                .id(TokenId::Function)
                .ident("sum")
                .id(TokenId::OpeningParenthesis)
                .ident("a")
                .id(TokenId::Comma)
                .ident("b")
                .id(TokenId::Colon)
                .ident("integer")
                .id(TokenId::Semicolon)
                .id(TokenId::Var)
                .ident("c")
                .id(TokenId::Colon)
                .ident("real")
                .id(TokenId::ClosingParenthesis)
                .id(TokenId::Colon)
                .ident("integer")
                .id(TokenId::Semicolon),
        );

        assert!(node.has(Marker::FuncDecl));
        let name = node.find(Marker::FuncName).and_then(Node::as_token).unwrap();
        assert_eq!(name.text(), "sum");
        assert_eq!(node.query(QueryType::Top, &[Marker::ParamGroupDecl]).len(), 2);
        let return_type = node.find(Marker::ReturnType).unwrap();
        assert!(return_type.has(Marker::Type));
    }

    #[test]
    fn test_function_call_arguments() {
        let node = parsed(
            "function-usage",
            TokenBuilder::new()
                .ident("max")
                .id(TokenId::OpeningParenthesis)
                .ident("a")
                .id(TokenId::Comma)
                .int("3")
                .id(TokenId::ClosingParenthesis),
        );

        assert!(node.has(Marker::FuncCall));
        assert_eq!(node.query(QueryType::Top, &[Marker::FuncArg]).len(), 2);
    }

    #[test]
    fn test_declarations() {
        let node = parsed(
            "block",
            TokenBuilder::new()
                .id(TokenId::Const)
                .ident("limit")
                .id(TokenId::Eq)
                .id(TokenId::Minus)
                .int("5")
                .id(TokenId::Semicolon)
                .id(TokenId::Type)
                .ident("count")
                .id(TokenId::Eq)
                .ident("integer")
                .id(TokenId::Semicolon)
                .id(TokenId::Var)
                .ident("a")
                .id(TokenId::Comma)
                .ident("b")
                .id(TokenId::Colon)
                .ident("count")
                .id(TokenId::Semicolon)
                .id(TokenId::Begin)
                .id(TokenId::End),
        );

        let declarations = node.find(Marker::Declarations).unwrap();
        assert_eq!(declarations.query(QueryType::Top, &[Marker::ConstDecl]).len(), 1);
        assert_eq!(declarations.query(QueryType::Top, &[Marker::TypeDecl]).len(), 1);
        let vars = declarations.query(QueryType::Top, &[Marker::VarDecl]);
        assert_eq!(vars.len(), 1);
        assert_eq!(vars[0].query(QueryType::Recursive, &[Marker::Name]).len(), 2);
        assert!(node.find(Marker::Operators).is_some());
    }

    #[test]
    fn test_composite_rejects_missing_end() {
        let outcome = parse_rule(
            "composite-operator",
            TokenBuilder::new().id(TokenId::Begin).ident("x").id(TokenId::Assign).int("1"),
        );

        assert_matches!(outcome, Outcome::NoMatch(unexpected) => {
            assert_eq!(unexpected.expected, TokenId::End);
            assert!(unexpected.actual.is_eof());
        });
    }
}
