//! Textual conditions for `select_where` and `theta_join`.
//!
//! Conditions are read with the sqlparser expression parser, so both `==`
//! and `=` spell equality and both `!=` and `<>` spell inequality.
//!
//! An attribute named like a SQL keyword (`interval`, `current_date`, ...)
//! can always be written in backticks: `` `interval` == 5 ``.

use std::cmp::Ordering;
use std::fmt::Display;

use sqlparser::ast::{BinaryOperator, Expr, FunctionArguments, UnaryOperator, Value as SqlValue};
use sqlparser::dialect::MySqlDialect;
use sqlparser::parser::Parser;
use sqlparser::tokenizer::Token;

use crate::persistence::{Error, Result, Row, Schema, Value};

/// The comparison operators a condition may use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
}

impl Comparison {
    fn from_operator(op: &BinaryOperator) -> Result<Comparison> {
        match op {
            BinaryOperator::Eq => Ok(Comparison::Eq),
            BinaryOperator::NotEq => Ok(Comparison::NotEq),
            BinaryOperator::Lt => Ok(Comparison::Lt),
            BinaryOperator::LtEq => Ok(Comparison::LtEq),
            BinaryOperator::Gt => Ok(Comparison::Gt),
            BinaryOperator::GtEq => Ok(Comparison::GtEq),
            other => Err(Error::UnsupportedOperator(other.to_string())),
        }
    }

    pub fn holds(&self, left: &Value, right: &Value) -> bool {
        //! Compare two values of the same domain by their natural order.

        let ordering = left.cmp(right);
        match self {
            Comparison::Eq => ordering == Ordering::Equal,
            Comparison::NotEq => ordering != Ordering::Equal,
            Comparison::Lt => ordering == Ordering::Less,
            Comparison::LtEq => ordering != Ordering::Greater,
            Comparison::Gt => ordering == Ordering::Greater,
            Comparison::GtEq => ordering != Ordering::Less,
        }
    }
}

impl Display for Comparison {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let op = match self {
            Comparison::Eq => "==",
            Comparison::NotEq => "!=",
            Comparison::Lt => "<",
            Comparison::LtEq => "<=",
            Comparison::Gt => ">",
            Comparison::GtEq => ">=",
        };
        write!(f, "{}", op)
    }
}

/// A compiled row filter.
pub(crate) type RowFilter = Box<dyn Fn(&Row) -> bool>;

fn invalid(condition: &str, reason: impl Into<String>) -> Error {
    Error::InvalidCondition {
        condition: condition.to_string(),
        reason: reason.into(),
    }
}

fn parse_expression(condition: &str) -> Result<Expr> {
    //! Parse the whole of `condition` as one expression.

    let dialect = MySqlDialect {};
    let mut parser = Parser::new(&dialect)
        .try_with_sql(condition)
        .map_err(|e| invalid(condition, e.to_string()))?;
    let expr = parser
        .parse_expr()
        .map_err(|e| invalid(condition, e.to_string()))?;

    let next = parser.peek_token();
    if next.token != Token::EOF {
        return Err(invalid(
            condition,
            format!("unexpected input after the condition: {}", next.token),
        ));
    }

    Ok(expr)
}

fn identifier(expr: &Expr) -> Option<String> {
    match expr {
        Expr::Identifier(ident) => Some(ident.value.clone()),
        Expr::Nested(inner) => identifier(inner),
        // niladic keywords such as `current_date` parse as argument-less calls
        Expr::Function(function) if matches!(function.args, FunctionArguments::None) => {
            Some(function.name.to_string())
        }
        _ => None,
    }
}

fn literal_text(expr: &Expr) -> Option<String> {
    //! The raw text of a literal operand. A bare word counts as a string.

    match expr {
        Expr::Value(value) => match &value.value {
            SqlValue::Number(number, _) => Some(number.clone()),
            SqlValue::SingleQuotedString(text) | SqlValue::DoubleQuotedString(text) => {
                Some(text.clone())
            }
            _ => None,
        },
        Expr::Identifier(ident) => Some(ident.value.clone()),
        Expr::UnaryOp {
            op: UnaryOperator::Minus,
            expr,
        } => literal_text(expr).map(|text| format!("-{}", text)),
        Expr::Nested(inner) => literal_text(inner),
        _ => None,
    }
}

pub(crate) fn compile_selection(condition: &str, schema: &Schema) -> Result<RowFilter> {
    //! Compile `attribute op value` (optionally joined with AND / OR) into a
    //! filter over rows of `schema`.
    //!
    //! The literal is read in the domain of the attribute, so a condition
    //! on an Integer column never matches by string comparison.

    let expr = parse_expression(condition)?;
    compile_expr(condition, &expr, schema)
}

fn compile_expr(condition: &str, expr: &Expr, schema: &Schema) -> Result<RowFilter> {
    match expr {
        Expr::Nested(inner) => compile_expr(condition, inner, schema),
        Expr::BinaryOp { left, op, right } => match op {
            BinaryOperator::And => {
                let left_filter = compile_expr(condition, left, schema)?;
                let right_filter = compile_expr(condition, right, schema)?;

                Ok(Box::new(move |row| left_filter(row) && right_filter(row)))
            }
            BinaryOperator::Or => {
                let left_filter = compile_expr(condition, left, schema)?;
                let right_filter = compile_expr(condition, right, schema)?;

                Ok(Box::new(move |row| left_filter(row) || right_filter(row)))
            }
            op => {
                let comparison = Comparison::from_operator(op)?;
                let (column, value) = compile_operands(condition, left, right, schema)?;

                Ok(Box::new(move |row| comparison.holds(&row[column], &value)))
            }
        },
        _ => Err(invalid(condition, "expected `attribute op value`")),
    }
}

fn compile_operands(
    condition: &str,
    left: &Expr,
    right: &Expr,
    schema: &Schema,
) -> Result<(usize, Value)> {
    let name = identifier(left)
        .ok_or_else(|| invalid(condition, "left operand must be an attribute name"))?;
    let column = schema
        .column_index(&name)
        .ok_or_else(|| Error::AttributeNotFound(name.clone()))?;
    let text = literal_text(right)
        .ok_or_else(|| invalid(condition, "right operand must be a literal value"))?;

    // column_index just resolved, so the attribute is there
    let attribute = &schema.attributes()[column];
    let value = Value::parse_as(attribute.domain, &text).ok_or_else(|| Error::TypeMismatch {
        column: attribute.name.clone(),
        expected: attribute.domain,
        found: text.clone(),
    })?;

    Ok((column, value))
}

/// `attr1 op attr2` between a column of the left and of the right table.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ThetaCondition {
    pub(crate) left: usize,
    pub(crate) op: Comparison,
    pub(crate) right: usize,
}

impl ThetaCondition {
    pub(crate) fn parse(condition: &str, left: &Schema, right: &Schema) -> Result<ThetaCondition> {
        //! Resolve `attr1` against `left`, `attr2` against `right`, and
        //! require both columns to share a domain.

        let expr = parse_expression(condition)?;
        let (left_expr, op, right_expr) = match &expr {
            Expr::BinaryOp { left, op, right } => (left.as_ref(), op, right.as_ref()),
            _ => return Err(invalid(condition, "expected `attribute op attribute`")),
        };

        let op = Comparison::from_operator(op)?;
        let left_name = identifier(left_expr)
            .ok_or_else(|| invalid(condition, "left operand must be an attribute name"))?;
        let right_name = identifier(right_expr)
            .ok_or_else(|| invalid(condition, "right operand must be an attribute name"))?;

        let left_pos = left
            .column_index(&left_name)
            .ok_or_else(|| Error::AttributeNotFound(left_name.clone()))?;
        let right_pos = right
            .column_index(&right_name)
            .ok_or_else(|| Error::AttributeNotFound(right_name.clone()))?;

        let left_domain = left.attributes()[left_pos].domain;
        let right_domain = right.attributes()[right_pos].domain;
        if left_domain != right_domain {
            return Err(Error::SchemaMismatch(format!(
                "cannot compare {} ({}) with {} ({})",
                left_name, left_domain, right_name, right_domain
            )));
        }

        Ok(ThetaCondition {
            left: left_pos,
            op,
            right: right_pos,
        })
    }

    pub(crate) fn holds(&self, left: &Row, right: &Row) -> bool {
        self.op.holds(&left[self.left], &right[self.right])
    }
}
