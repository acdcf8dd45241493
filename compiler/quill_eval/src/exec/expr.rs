//! Expression evaluation and operators.

use std::cmp::Ordering;

use quill_ir::{BinaryOp, Expr, ExprKind, StringInterner, UnaryOp};
use quill_model::errors::{
    binary_type_mismatch, division_by_zero, integer_overflow, modulo_by_zero, type_mismatch,
    undefined_field,
};
use quill_model::{EvalResult, Model};
use quill_stack::ensure_sufficient_stack;

use crate::Environment;

impl Environment<'_> {
    /// Evaluate `expr` in the current scope chain.
    ///
    /// Errors are located at the innermost failing node.
    pub fn eval_expr(&mut self, expr: &Expr) -> EvalResult {
        ensure_sufficient_stack(|| self.eval_expr_inner(expr))
            .map_err(|err| self.locate(err, expr.span))
    }

    fn eval_expr_inner(&mut self, expr: &Expr) -> EvalResult {
        match &expr.kind {
            ExprKind::Int(n) => Ok(Model::Int(*n)),
            ExprKind::Float(f) => Ok(Model::Float(*f)),
            ExprKind::Bool(b) => Ok(Model::Bool(*b)),
            ExprKind::Str(s) => Ok(Model::string(self.interner().lookup(*s))),
            ExprKind::Ident(name) => self.resolve(*name),
            ExprKind::Dot { target, field } => {
                let model = self.eval_expr(target)?;
                let field = self.interner().lookup(*field);
                model
                    .field(field)
                    .ok_or_else(|| undefined_field(field, model.type_name()))
            }
            ExprKind::Call { target, args } => self.eval_call(expr, target, args),
            ExprKind::List(items) => {
                let mut values = Vec::with_capacity(items.len());
                for item in items.iter() {
                    values.push(self.eval_expr(item)?);
                }
                Ok(Model::sequence(values))
            }
            ExprKind::Paren(inner) => self.eval_expr(inner),
            ExprKind::Unary { op, operand } => {
                let value = self.eval_expr(operand)?;
                evaluate_unary(*op, &value)
            }
            ExprKind::Binary { op, left, right } => self.eval_binary(*op, left, right),
        }
    }

    fn eval_binary(&mut self, op: BinaryOp, left: &Expr, right: &Expr) -> EvalResult {
        let lhs = self.eval_expr(left)?;
        match op {
            BinaryOp::And | BinaryOp::Or => {
                let l = lhs
                    .as_bool()
                    .ok_or_else(|| type_mismatch("boolean", lhs.type_name()))?;
                if l == (op == BinaryOp::Or) {
                    return Ok(Model::Bool(l));
                }
                let rhs = self.eval_expr(right)?;
                rhs.as_bool()
                    .map(Model::Bool)
                    .ok_or_else(|| type_mismatch("boolean", rhs.type_name()))
            }
            _ => {
                let rhs = self.eval_expr(right)?;
                evaluate_binary(op, &lhs, &rhs)
            }
        }
    }
}

/// Value of a literal expression, without any runtime state.
///
/// `None` for anything that is not a literal (calls never are) and for
/// literal arithmetic that fails, such as `1 / 0`.
pub fn constant_value(expr: &Expr, interner: &StringInterner) -> Option<Model> {
    if !expr.is_literal() {
        return None;
    }
    fold(expr, interner)
}

fn fold(expr: &Expr, interner: &StringInterner) -> Option<Model> {
    match &expr.kind {
        ExprKind::Int(n) => Some(Model::Int(*n)),
        ExprKind::Float(f) => Some(Model::Float(*f)),
        ExprKind::Bool(b) => Some(Model::Bool(*b)),
        ExprKind::Str(s) => Some(Model::string(interner.lookup(*s))),
        ExprKind::List(items) => items
            .iter()
            .map(|item| fold(item, interner))
            .collect::<Option<Vec<_>>>()
            .map(Model::sequence),
        ExprKind::Paren(inner) => fold(inner, interner),
        ExprKind::Unary { op, operand } => evaluate_unary(*op, &fold(operand, interner)?).ok(),
        ExprKind::Binary { op, left, right } => {
            evaluate_binary(*op, &fold(left, interner)?, &fold(right, interner)?).ok()
        }
        ExprKind::Ident(_) | ExprKind::Dot { .. } | ExprKind::Call { .. } => None,
    }
}

pub(crate) fn evaluate_unary(op: UnaryOp, value: &Model) -> EvalResult {
    match (op, value) {
        (UnaryOp::Neg, Model::Int(n)) => n
            .checked_neg()
            .map(Model::Int)
            .ok_or_else(|| integer_overflow("negation")),
        (UnaryOp::Neg, Model::Float(f)) => Ok(Model::Float(-f)),
        (UnaryOp::Not, Model::Bool(b)) => Ok(Model::Bool(!b)),
        (UnaryOp::Neg, _) => Err(type_mismatch("number", value.type_name())),
        (UnaryOp::Not, _) => Err(type_mismatch("boolean", value.type_name())),
    }
}

#[derive(Copy, Clone)]
enum Num {
    Int(i64),
    Float(f64),
}

impl Num {
    fn of(model: &Model) -> Option<Num> {
        match model {
            Model::Int(n) => Some(Num::Int(*n)),
            Model::Float(f) => Some(Num::Float(*f)),
            _ => None,
        }
    }

    #[expect(
        clippy::cast_precision_loss,
        reason = "mixed int/float arithmetic promotes to float"
    )]
    fn to_f64(self) -> f64 {
        match self {
            Num::Int(n) => n as f64,
            Num::Float(f) => f,
        }
    }
}

/// Binary operators other than short-circuit evaluation, which lives in
/// `Environment::eval_binary`.
pub(crate) fn evaluate_binary(op: BinaryOp, lhs: &Model, rhs: &Model) -> EvalResult {
    let mismatch = || binary_type_mismatch(op.as_symbol(), lhs.type_name(), rhs.type_name());
    match op {
        BinaryOp::Add => match (Num::of(lhs), Num::of(rhs)) {
            (Some(l), Some(r)) => arithmetic(op, l, r),
            _ if concatenates(lhs, rhs) => Ok(Model::string(format!("{lhs}{rhs}"))),
            _ => Err(mismatch()),
        },
        BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Div | BinaryOp::Mod => {
            match (Num::of(lhs), Num::of(rhs)) {
                (Some(l), Some(r)) => arithmetic(op, l, r),
                _ => Err(mismatch()),
            }
        }
        BinaryOp::Eq => Ok(Model::Bool(equals(lhs, rhs))),
        BinaryOp::NotEq => Ok(Model::Bool(!equals(lhs, rhs))),
        BinaryOp::Lt | BinaryOp::LtEq | BinaryOp::Gt | BinaryOp::GtEq => {
            let ordering = compare(lhs, rhs).ok_or_else(mismatch)?;
            Ok(Model::Bool(match op {
                BinaryOp::Lt => ordering == Ordering::Less,
                BinaryOp::LtEq => ordering != Ordering::Greater,
                BinaryOp::Gt => ordering == Ordering::Greater,
                _ => ordering != Ordering::Less,
            }))
        }
        BinaryOp::And | BinaryOp::Or => match (lhs.as_bool(), rhs.as_bool()) {
            (Some(l), Some(r)) => Ok(Model::Bool(if op == BinaryOp::And {
                l && r
            } else {
                l || r
            })),
            _ => Err(mismatch()),
        },
    }
}

/// `+` concatenates when one side is a string and the other a scalar.
fn concatenates(lhs: &Model, rhs: &Model) -> bool {
    let scalar = |m: &Model| {
        matches!(
            m,
            Model::Str(_) | Model::Int(_) | Model::Float(_) | Model::Bool(_)
        )
    };
    (matches!(lhs, Model::Str(_)) || matches!(rhs, Model::Str(_))) && scalar(lhs) && scalar(rhs)
}

fn arithmetic(op: BinaryOp, l: Num, r: Num) -> EvalResult {
    if let (Num::Int(a), Num::Int(b)) = (l, r) {
        return match op {
            BinaryOp::Add => a.checked_add(b).ok_or_else(|| integer_overflow("addition")),
            BinaryOp::Sub => a
                .checked_sub(b)
                .ok_or_else(|| integer_overflow("subtraction")),
            BinaryOp::Mul => a
                .checked_mul(b)
                .ok_or_else(|| integer_overflow("multiplication")),
            BinaryOp::Div if b == 0 => Err(division_by_zero()),
            BinaryOp::Div => a.checked_div(b).ok_or_else(|| integer_overflow("division")),
            BinaryOp::Mod if b == 0 => Err(modulo_by_zero()),
            _ => a.checked_rem(b).ok_or_else(|| integer_overflow("modulo")),
        }
        .map(Model::Int);
    }
    let (a, b) = (l.to_f64(), r.to_f64());
    Ok(Model::Float(match op {
        BinaryOp::Add => a + b,
        BinaryOp::Sub => a - b,
        BinaryOp::Mul => a * b,
        BinaryOp::Div => a / b,
        _ => a % b,
    }))
}

#[expect(clippy::float_cmp, reason = "numbers compare exactly after promotion")]
fn equals(lhs: &Model, rhs: &Model) -> bool {
    match (Num::of(lhs), Num::of(rhs)) {
        (Some(Num::Int(a)), Some(Num::Int(b))) => a == b,
        (Some(l), Some(r)) => l.to_f64() == r.to_f64(),
        _ => lhs == rhs,
    }
}

fn compare(lhs: &Model, rhs: &Model) -> Option<Ordering> {
    match (Num::of(lhs), Num::of(rhs)) {
        (Some(Num::Int(a)), Some(Num::Int(b))) => Some(a.cmp(&b)),
        (Some(l), Some(r)) => l.to_f64().partial_cmp(&r.to_f64()),
        _ => match (lhs, rhs) {
            (Model::Str(a), Model::Str(b)) => Some(a.cmp(b)),
            _ => None,
        },
    }
}
