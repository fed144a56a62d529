//! Stack-based bytecode virtual machine.
//!
//! A chromosome is read as a linear program of hex nibbles. Each nibble is an
//! opcode from a flat table; `PUSH`, `READ` and `COUNT` take the following
//! nibble as an operand. Any other character is noise and is skipped.
//!
//! | code | name    | effect |
//! |------|---------|--------|
//! | `0`  | PUSH    | push the operand nibble |
//! | `1`  | DUP     | duplicate the top value |
//! | `2`  | DROP    | discard the top value |
//! | `3`  | ADD     | pop `b1`, `b2`; push `b1 + b2` (wrapping) |
//! | `4`  | SUB     | pop `b1`, `b2`; push `b1 - b2` (wrapping) |
//! | `5`  | CMP     | pop `b1`, `b2`; push `1` if equal else `0` |
//! | `6`  | NOT     | pop `v`; push `1` if `v == 0` else `0` |
//! | `7`  | IF      | pop `v`; if zero, skip to the matching `ENDIF` |
//! | `8`  | ENDIF   | marker |
//! | `9`  | RET     | pop `v`; keep it as the verdict if in `0..=9` and better |
//! | `A`  | READ    | pop a card index; push its rank (even operand) or suit (odd) |
//! | `B`  | COUNT   | pop a rank (even operand) or suit (odd); push the matching card count |
//! | `C`  | LOOP    | pop `high`, `low`; run the body once per `i` in `low..=high` |
//! | `D`  | ENDLOOP | end of a loop body |
//! | `E`, `F` | UNK | no-op |
//!
//! # Failure Model
//!
//! There is no failing program. Instructions whose operands are missing from
//! the stack do nothing, values are wrapped or normalized into their domain,
//! and reaching the end of the program stops execution. Badly formed
//! chromosomes simply return [`NO_VERDICT`] or a wrong verdict, which is the
//! selection pressure the genetic algorithm relies on.
//!
//! # Termination
//!
//! The cursor only moves backwards when a `LOOP` rewinds to its body. Loop
//! bounds are limited to at most 142 iterations (`-128..=13`), and nesting is
//! capped by [`InterpreterConfig::max_loop_depth`], so every run terminates.

pub use self::{decoder::*, interpreter::*, opcode::*, stack::STACK_CAPACITY};

mod decoder;
mod interpreter;
mod opcode;
mod stack;
