//! The tree-walking interpreter.
//!
//! Expressions evaluate recursively to a [`Value`]; statements execute to a
//! [`Flow`], where `Flow::Return` is the control-flow signal that unwinds a
//! `return` statement out of nested blocks and loops to the enclosing call.
//! Runtime errors propagate as `Err` through every level, which realizes
//! the sticky-error contract: the first error unwinds to the top-level
//! statement loop with no further evaluation and no further side effects.
//!
//! Sub-evaluation order is strictly left-to-right everywhere: binary
//! operands, logical operands, call arguments.

use smallvec::SmallVec;

use crate::{
    ast::{BinaryOp, Expr, Ident, Literal, LogicalOp, Stmt, UnaryOp},
    env::{EnvId, Environments, GLOBAL_ENV},
    error::{RunResult, RuntimeError},
    heap::{FnId, Heap},
    intern::Interns,
    io::PrintWriter,
    natives::NativeFn,
    tracer::Tracer,
    value::Value,
};

/// Default cap on user-function call depth.
pub const DEFAULT_MAX_CALL_DEPTH: usize = 255;

/// Outcome of executing a statement.
///
/// `Return` crosses statement boundaries as a distinct status rather than
/// an error; only a function call boundary consumes it.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Flow {
    Normal,
    Return(Value),
}

/// Interpreter state for one run.
///
/// Borrows the parsed program (heap of function definitions) and the intern
/// table from the runner; owns the environment arena and call bookkeeping.
pub(crate) struct Interp<'a, P: PrintWriter, T: Tracer> {
    heap: &'a Heap,
    interns: &'a mut Interns,
    print: &'a mut P,
    tracer: T,
    envs: Environments,
    /// The innermost environment statements execute in.
    current: EnvId,
    /// Active user-function frames.
    depth: usize,
    max_depth: usize,
}

impl<'a, P: PrintWriter, T: Tracer> Interp<'a, P, T> {
    /// Creates the interpreter and populates the global environment with
    /// every native function.
    pub fn new(heap: &'a Heap, interns: &'a mut Interns, print: &'a mut P, tracer: T, max_depth: usize) -> Self {
        let mut interp = Self {
            heap,
            interns,
            print,
            tracer,
            envs: Environments::new(),
            current: GLOBAL_ENV,
            depth: 0,
            max_depth,
        };
        interp.define_natives();
        interp
    }

    fn define_natives(&mut self) {
        for native in NativeFn::all() {
            let name = self.interns.copy(native.name());
            self.envs.define(GLOBAL_ENV, name, Value::Native(native));
        }
    }

    /// Executes the top-level statement list.
    ///
    /// `Flow::Return` cannot reach here — the parser rejects `return`
    /// outside function bodies — so the flow result is discarded.
    pub fn interpret(&mut self, statements: &[Stmt]) -> Result<(), RuntimeError> {
        for stmt in statements {
            self.exec(stmt)?;
        }
        Ok(())
    }

    // --- Statement execution ---

    fn exec(&mut self, stmt: &Stmt) -> RunResult<Flow> {
        match stmt {
            Stmt::Block(statements) => {
                let scope = self.envs.push(self.current);
                let prev = std::mem::replace(&mut self.current, scope);
                let flow = self.exec_all(statements);
                // Restore and release on every exit path, error included.
                self.current = prev;
                self.envs.release(scope);
                flow
            }
            Stmt::Expression(expr) => {
                self.eval(expr)?;
                Ok(Flow::Normal)
            }
            Stmt::Function(id) => {
                let def = self.heap.get_function(*id);
                self.envs.define(self.current, def.name.name, Value::Fn(*id));
                Ok(Flow::Normal)
            }
            Stmt::If {
                condition,
                then_branch,
                else_branch,
            } => {
                if self.eval(condition)?.is_truthy() {
                    self.exec(then_branch)
                } else if let Some(else_branch) = else_branch {
                    self.exec(else_branch)
                } else {
                    Ok(Flow::Normal)
                }
            }
            Stmt::Print(expr) => {
                let value = self.eval(expr)?;
                let text = value.repr(self.heap, self.interns);
                self.print.stdout_write(&text);
                self.print.stdout_push('\n');
                Ok(Flow::Normal)
            }
            Stmt::Return { value, .. } => {
                let value = match value {
                    Some(expr) => self.eval(expr)?,
                    None => Value::Nil,
                };
                Ok(Flow::Return(value))
            }
            Stmt::Var { name, initializer } => {
                let value = match initializer {
                    Some(expr) => self.eval(expr)?,
                    None => Value::Nil,
                };
                self.envs.define(self.current, name.name, value);
                Ok(Flow::Normal)
            }
            Stmt::While { condition, body } => {
                while self.eval(condition)?.is_truthy() {
                    match self.exec(body)? {
                        Flow::Normal => {}
                        flow @ Flow::Return(_) => return Ok(flow),
                    }
                }
                Ok(Flow::Normal)
            }
        }
    }

    /// Executes statements in order until one yields a non-normal flow.
    fn exec_all(&mut self, statements: &[Stmt]) -> RunResult<Flow> {
        for stmt in statements {
            match self.exec(stmt)? {
                Flow::Normal => {}
                flow @ Flow::Return(_) => return Ok(flow),
            }
        }
        Ok(Flow::Normal)
    }

    // --- Expression evaluation ---

    fn eval(&mut self, expr: &Expr) -> RunResult<Value> {
        match expr {
            Expr::Literal(literal) => Ok(match *literal {
                Literal::Nil => Value::Nil,
                Literal::Bool(b) => Value::Bool(b),
                Literal::Number(n) => Value::Number(n),
                Literal::Str(id) => Value::Str(id),
            }),
            Expr::Grouping(inner) => self.eval(inner),
            Expr::Variable(name) => match self.envs.get(self.current, name.name) {
                Some(value) => Ok(value),
                None => Err(self.undefined(name)),
            },
            Expr::Assign { name, value } => {
                let value = self.eval(value)?;
                if self.envs.assign(self.current, name.name, value) {
                    Ok(value)
                } else {
                    Err(self.undefined(name))
                }
            }
            Expr::Logical { op, left, right } => {
                let left = self.eval(left)?;
                // The result is the deciding operand itself, never a
                // coerced boolean.
                let short_circuits = match op {
                    LogicalOp::Or => left.is_truthy(),
                    LogicalOp::And => !left.is_truthy(),
                };
                if short_circuits { Ok(left) } else { self.eval(right) }
            }
            Expr::Unary { op, line, operand } => {
                let value = self.eval(operand)?;
                match op {
                    UnaryOp::Not => Ok(Value::Bool(!value.is_truthy())),
                    UnaryOp::Negate => match value.as_number() {
                        Some(n) => Ok(Value::Number(-n)),
                        None => Err(RuntimeError::at(*line, op.symbol(), "Operand must be a number.")),
                    },
                }
            }
            Expr::Binary { op, line, left, right } => {
                let left = self.eval(left)?;
                let right = self.eval(right)?;
                self.binary(*op, *line, left, right)
            }
            Expr::Call { callee, line, args } => {
                let callee = self.eval(callee)?;
                let mut values: SmallVec<[Value; 8]> = SmallVec::with_capacity(args.len());
                for arg in args {
                    values.push(self.eval(arg)?);
                }
                self.call_value(callee, &values, *line)
            }
        }
    }

    fn binary(&mut self, op: BinaryOp, line: u32, left: Value, right: Value) -> RunResult<Value> {
        match op {
            BinaryOp::Add => match (left, right) {
                (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a + b)),
                (Value::Str(a), Value::Str(b)) => {
                    let text = format!("{}{}", self.interns.get(a), self.interns.get(b));
                    Ok(Value::Str(self.interns.take(text)))
                }
                _ => Err(RuntimeError::at(
                    line,
                    op.symbol(),
                    "Operands must be two numbers or two strings.",
                )),
            },
            BinaryOp::Equal => Ok(Value::Bool(left.eq_value(right))),
            BinaryOp::NotEqual => Ok(Value::Bool(!left.eq_value(right))),
            _ => {
                let (Some(a), Some(b)) = (left.as_number(), right.as_number()) else {
                    return Err(RuntimeError::at(line, op.symbol(), "Operands must be numbers."));
                };
                match op {
                    BinaryOp::Sub => Ok(Value::Number(a - b)),
                    BinaryOp::Mul => Ok(Value::Number(a * b)),
                    BinaryOp::Div => {
                        if b == 0.0 {
                            Err(RuntimeError::at(line, op.symbol(), "Division by zero."))
                        } else {
                            Ok(Value::Number(a / b))
                        }
                    }
                    BinaryOp::Less => Ok(Value::Bool(a < b)),
                    BinaryOp::LessEqual => Ok(Value::Bool(a <= b)),
                    BinaryOp::Greater => Ok(Value::Bool(a > b)),
                    BinaryOp::GreaterEqual => Ok(Value::Bool(a >= b)),
                    BinaryOp::Add | BinaryOp::Equal | BinaryOp::NotEqual => unreachable!("handled above"),
                }
            }
        }
    }

    // --- Calls ---

    fn call_value(&mut self, callee: Value, args: &[Value], line: u32) -> RunResult<Value> {
        match callee {
            Value::Fn(id) => self.call_function(id, args, line),
            Value::Native(native) => native.call(args, self.heap, self.interns, self.print),
            _ => Err(RuntimeError::at(line, ")", "Can only call functions and classes.")),
        }
    }

    fn call_function(&mut self, id: FnId, args: &[Value], line: u32) -> RunResult<Value> {
        let heap = self.heap;
        let def = heap.get_function(id);
        if args.len() != def.arity() {
            return Err(RuntimeError::at(
                line,
                ")",
                format!("Expected {} arguments but got {}.", def.arity(), args.len()),
            ));
        }
        if self.depth >= self.max_depth {
            return Err(RuntimeError::at(line, ")", "Stack overflow."));
        }

        // The frame parents on the CALLER's environment at the call site,
        // not the definition site; functions see the dynamic scope.
        let frame = self.envs.push(self.current);
        for (param, value) in def.params.iter().zip(args) {
            self.envs.define(frame, param.name, *value);
        }

        self.depth += 1;
        self.tracer.on_call(self.interns.get(def.name.name), self.depth);
        let prev = std::mem::replace(&mut self.current, frame);
        let flow = self.exec_all(&def.body);
        // Restore and release on every exit path, error included.
        self.current = prev;
        self.envs.release(frame);
        self.depth -= 1;
        self.tracer.on_return(self.depth);

        match flow? {
            Flow::Return(value) => Ok(value),
            Flow::Normal => Ok(Value::Nil),
        }
    }

    fn undefined(&self, name: &Ident) -> RuntimeError {
        let lexeme = self.interns.get(name.name);
        RuntimeError::at(name.line, lexeme, format!("Undefined variable '{lexeme}'."))
    }
}
