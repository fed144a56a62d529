use serde::{Deserialize, Serialize};

use crate::{Hand, Organism};

use super::{OpCode, STACK_CAPACITY, decoder::Decoder, stack::Stack};

/// Verdict returned when a program never executes a valid `RET`.
pub const NO_VERDICT: i8 = -1;

/// Largest value `RET` accepts as a verdict.
const MAX_VERDICT: i8 = 9;

/// Largest `high` bound accepted by `LOOP`.
const MAX_LOOP_BOUND: i8 = 13;

/// Upper bound on the configurable loop nesting depth.
///
/// Each nesting level multiplies the worst-case running time by the maximum
/// iteration count of a loop.
pub const MAX_LOOP_DEPTH: usize = 4;

/// Resource limits of the interpreter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterpreterConfig {
    /// Maximum number of values on the stack. Pushes beyond it are no-ops.
    pub max_stack: usize,
    /// Maximum number of nested `LOOP`s. A `LOOP` at this depth is a no-op.
    pub max_loop_depth: usize,
}

impl Default for InterpreterConfig {
    fn default() -> Self {
        Self {
            max_stack: 32,
            max_loop_depth: 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum InterpreterConfigError {
    #[display("max stack size must be in [1, {max}] but was {size}")]
    InvalidStackSize { size: usize, max: usize },
    #[display("max loop depth must be at most {max} but was {depth}")]
    InvalidLoopDepth { depth: usize, max: usize },
}

/// The outcome of running one organism against one hand.
#[derive(Debug, Clone, Copy)]
pub struct Evaluation<'a> {
    pub hand: &'a Hand,
    pub organism: &'a Organism,
    /// The best verdict the program returned, or [`NO_VERDICT`].
    pub guess: i8,
}

impl Evaluation<'_> {
    /// Returns `true` if the guess matches the hand's ground-truth category.
    #[must_use]
    pub fn is_correct(&self) -> bool {
        self.hand.category().matches(self.guess)
    }
}

/// Interprets chromosomes as stack-machine programs.
///
/// The interpreter itself holds only its configuration. Every call to
/// [`process`](Self::process) builds a private execution state, so a single
/// instance can be shared by any number of threads without synchronization.
///
/// # Example
///
/// ```
/// use pokerga_engine::{Chromosome, Hand, Organism, vm::Interpreter};
///
/// let hand: Hand = "5,1,7,3,7,4,8,4,9,2,6".parse().unwrap();
/// // PUSH(0) READ(rank) RET
/// let organism = Organism::new("00000000".into(), Chromosome::new("00A09").unwrap());
///
/// let interpreter = Interpreter::default();
/// let evaluation = interpreter.process(&hand, &organism);
/// assert_eq!(evaluation.guess, 5);
/// assert!(!evaluation.is_correct());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Interpreter {
    config: InterpreterConfig,
}

impl Interpreter {
    pub fn new(config: InterpreterConfig) -> Result<Self, InterpreterConfigError> {
        if !(1..=STACK_CAPACITY).contains(&config.max_stack) {
            return Err(InterpreterConfigError::InvalidStackSize {
                size: config.max_stack,
                max: STACK_CAPACITY,
            });
        }
        if config.max_loop_depth > MAX_LOOP_DEPTH {
            return Err(InterpreterConfigError::InvalidLoopDepth {
                depth: config.max_loop_depth,
                max: MAX_LOOP_DEPTH,
            });
        }
        Ok(Self { config })
    }

    #[must_use]
    pub fn config(&self) -> &InterpreterConfig {
        &self.config
    }

    /// Runs the organism's chromosome against the hand.
    #[must_use]
    pub fn process<'a>(&self, hand: &'a Hand, organism: &'a Organism) -> Evaluation<'a> {
        let guess = self.run(hand, organism.chromosome().as_bytes());
        Evaluation {
            hand,
            organism,
            guess,
        }
    }

    /// Runs a raw program against the hand and returns its verdict in
    /// `[-1, 9]`.
    ///
    /// Every byte sequence is a valid program: the call always terminates and
    /// never fails.
    #[must_use]
    pub fn run(&self, hand: &Hand, program: &[u8]) -> i8 {
        let mut machine = Machine::new(hand, program, &self.config);
        machine.execute();
        machine.best
    }
}

/// Execution state of a single run.
#[derive(Debug)]
struct Machine<'a> {
    hand: &'a Hand,
    decoder: Decoder<'a>,
    stack: Stack,
    loop_depth: usize,
    max_loop_depth: usize,
    best: i8,
}

impl<'a> Machine<'a> {
    fn new(hand: &'a Hand, program: &'a [u8], config: &InterpreterConfig) -> Self {
        Self {
            hand,
            decoder: Decoder::new(program),
            stack: Stack::new(config.max_stack),
            loop_depth: 0,
            max_loop_depth: config.max_loop_depth,
            best: NO_VERDICT,
        }
    }

    fn execute(&mut self) {
        self.execute_until(None);
    }

    /// Executes instructions until `terminator` has been executed or the
    /// program ends.
    fn execute_until(&mut self, terminator: Option<OpCode>) {
        while let Some(op) = self.decoder.next_op() {
            self.step(op);
            if Some(op) == terminator {
                return;
            }
        }
    }

    fn step(&mut self, op: OpCode) {
        match op {
            OpCode::Push => self.push(),
            OpCode::Dup => self.dup(),
            OpCode::Drop => {
                self.stack.pop();
            }
            OpCode::Add => self.binary(i8::wrapping_add),
            OpCode::Sub => self.binary(i8::wrapping_sub),
            OpCode::Cmp => self.binary(|b1, b2| i8::from(b1 == b2)),
            OpCode::Not => self.not(),
            OpCode::If => self.if_op(),
            OpCode::EndIf | OpCode::EndLoop | OpCode::Unknown => {}
            OpCode::Ret => self.ret(),
            OpCode::Read => self.read(),
            OpCode::Count => self.count(),
            OpCode::Loop => self.loop_op(),
        }
    }

    /// Reads an operand nibble as a value.
    #[expect(clippy::cast_possible_wrap)]
    fn operand(&mut self) -> Option<i8> {
        self.decoder.next_nibble().map(|n| n as i8)
    }

    fn push(&mut self) {
        if let Some(value) = self.operand() {
            self.stack.push(value);
        }
    }

    fn dup(&mut self) {
        if let Some(value) = self.stack.peek() {
            self.stack.push(value);
        }
    }

    /// Pops `b1` (top) then `b2`, and pushes `f(b1, b2)`.
    fn binary<F>(&mut self, f: F)
    where
        F: FnOnce(i8, i8) -> i8,
    {
        if self.stack.len() < 2 {
            return;
        }
        if let (Some(b1), Some(b2)) = (self.stack.pop(), self.stack.pop()) {
            self.stack.push(f(b1, b2));
        }
    }

    fn not(&mut self) {
        if let Some(value) = self.stack.pop() {
            self.stack.push(i8::from(value == 0));
        }
    }

    fn if_op(&mut self) {
        if let Some(condition) = self.stack.pop()
            && condition == 0
        {
            self.skip_to_end_if();
        }
    }

    /// Skips forward past the `ENDIF` matching an `IF` that was just taken
    /// as false, without executing anything in between.
    fn skip_to_end_if(&mut self) {
        let mut nesting = 0usize;
        while let Some(inst) = self.decoder.next_instruction() {
            match inst.op {
                OpCode::If => nesting += 1,
                OpCode::EndIf if nesting == 0 => return,
                OpCode::EndIf => nesting -= 1,
                _ => {}
            }
        }
    }

    fn ret(&mut self) {
        if let Some(value) = self.stack.pop()
            && (0..=MAX_VERDICT).contains(&value)
            && value > self.best
        {
            self.best = value;
        }
    }

    #[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    fn read(&mut self) {
        let Some(field) = self.operand() else {
            return;
        };
        let Some(index) = self.stack.pop() else {
            return;
        };
        let card = self
            .hand
            .card_wrapping(usize::from(index.rem_euclid(Hand::LEN as i8).unsigned_abs()));
        let value = if field % 2 == 0 {
            card.rank()
        } else {
            card.suit().number()
        };
        self.stack.push(value as i8);
    }

    #[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    fn count(&mut self) {
        let Some(mode) = self.operand() else {
            return;
        };
        let Some(raw) = self.stack.pop() else {
            return;
        };
        let count = if mode % 2 == 0 {
            self.hand.count_rank(normalize(raw, crate::Card::MAX_RANK))
        } else {
            self.hand.count_suit(normalize(raw, crate::Suit::LEN as u8))
        };
        self.stack.push(count as i8);
    }

    fn loop_op(&mut self) {
        if self.stack.len() < 2 {
            return;
        }
        let (Some(high), Some(low)) = (self.stack.pop(), self.stack.pop()) else {
            return;
        };
        if high > MAX_LOOP_BOUND || low >= high || self.loop_depth >= self.max_loop_depth {
            return;
        }

        // An iteration ends at ENDLOOP or at the end of the program. After the
        // last one execution continues from wherever the body stopped.
        let body = self.decoder.position();
        self.loop_depth += 1;
        for i in low..=high {
            self.decoder.rewind(body);
            self.stack.push(i);
            self.execute_until(Some(OpCode::EndLoop));
        }
        self.loop_depth -= 1;
    }
}

/// Maps an arbitrary stack value into `1..=domain`, keeping values already
/// inside the domain unchanged.
#[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn normalize(raw: i8, domain: u8) -> u8 {
    ((i16::from(raw) - 1).rem_euclid(i16::from(domain)) + 1) as u8
}
