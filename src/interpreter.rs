// interpreter.rs - Threaded-code dispatch and the top-level runner

use std::rc::Rc;

use crate::errors::ForthError;
use crate::primitives::{DataStack, Primitive};
use crate::value::Value;
use crate::word::{Cell, Word};

/// A saved program counter for a nested CALL.
struct Frame {
    body: Rc<[Cell]>,
    pc: usize,
}

/// Executes compound bodies. The dispatch loop reads one op cell, advances
/// past it and any inline parameter, and hands control to the next op; the
/// return stack is host-side and distinct from the operand stack.
pub struct Interpreter {
    pub stack: DataStack,
    return_stack: Vec<Frame>,
}

impl Interpreter {
    pub fn new(stack_size: usize) -> Interpreter {
        Interpreter {
            stack: DataStack::new(stack_size),
            return_stack: Vec::new(),
        }
    }

    /// Runs `body` to its terminating RETURN. Infallible on a finished
    /// word: the effect analysis has already bounded every stack access.
    pub fn execute(&mut self, body: Rc<[Cell]>) {
        let mut body = body;
        let mut pc = 0usize;
        loop {
            let op = match &body[pc] {
                Cell::Op(prim) => *prim,
                _ => unreachable!("param cell reached as an instruction"),
            };
            pc += 1;
            match op {
                Primitive::Call => {
                    let callee = body[pc].callee();
                    pc += 1;
                    self.return_stack.push(Frame { body, pc });
                    body = callee;
                    pc = 0;
                }
                Primitive::Return => match self.return_stack.pop() {
                    Some(frame) => {
                        body = frame.body;
                        pc = frame.pc;
                    }
                    None => return,
                },
                Primitive::Literal => {
                    let v = body[pc].value();
                    pc += 1;
                    self.stack.push(v);
                }
                Primitive::Branch => {
                    let offset = body[pc].offset();
                    pc += 1;
                    pc = offset_pc(pc, offset);
                }
                Primitive::ZBranch => {
                    let offset = body[pc].offset();
                    pc += 1;
                    // Predicate is popped first, then the branch is taken on
                    // false/zero.
                    if !self.stack.pop().is_truthy() {
                        pc = offset_pc(pc, offset);
                    }
                }
                prim => prim.execute(&mut self.stack),
            }
        }
    }
}

fn offset_pc(pc: usize, offset: isize) -> usize {
    (pc as isize + offset) as usize
}

/// Runs a compound word that needs no inputs and returns the top value it
/// leaves behind. The operand stack is sized from the word's verified peak.
pub fn run(word: &Word) -> Result<Value, ForthError> {
    let body = word.body().ok_or(ForthError::NotCompound)?;
    let effect = word.effect();
    if effect.input() != 0 {
        return Err(ForthError::WordNeedsInputs {
            needed: effect.input(),
            available: 0,
        });
    }
    if effect.output() == 0 {
        return Err(ForthError::NoResult);
    }

    let mut interp = Interpreter::new(effect.max() as usize);
    interp.execute(body);
    Ok(interp.stack.top().clone())
}

/// Runs a compound word against an existing stack of values (bottom first),
/// writing the resulting stack back into `values`. This is how a session
/// threads one stack through a sequence of separately compiled words.
pub fn run_with_stack(word: &Word, values: &mut Vec<Value>) -> Result<(), ForthError> {
    let body = word.body().ok_or(ForthError::NotCompound)?;
    let effect = word.effect();
    if effect.input() as usize > values.len() {
        return Err(ForthError::WordNeedsInputs {
            needed: effect.input(),
            available: values.len(),
        });
    }

    let capacity = values.len() - effect.input() as usize + effect.max() as usize;
    let mut interp = Interpreter::new(capacity);
    for v in values.drain(..) {
        interp.stack.push(v);
    }
    interp.execute(body);

    while !interp.stack.is_empty() {
        values.push(interp.stack.pop());
    }
    values.reverse();
    Ok(())
}
