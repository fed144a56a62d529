use std::fmt;

use super::OpCode;

/// A decoded instruction: an opcode plus its operand nibble, if it takes one.
///
/// The operand is `None` for instructions without operands, and also for an
/// operand-taking instruction truncated by the end of the program.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instruction {
    pub op: OpCode,
    pub operand: Option<u8>,
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.op, self.operand) {
            (OpCode::Read | OpCode::Count, Some(operand)) => {
                let field = if operand % 2 == 0 { "rank" } else { "suit" };
                write!(f, "{}({field})", self.op)
            }
            (_, Some(operand)) => write!(f, "{}({operand:X})", self.op),
            (op, None) if op.has_operand() => write!(f, "{op}(?)"),
            (op, None) => write!(f, "{op}"),
        }
    }
}

/// Reads nibbles from a program buffer, skipping non-hex noise.
#[derive(Debug, Clone)]
pub(crate) struct Decoder<'p> {
    program: &'p [u8],
    cursor: usize,
}

impl<'p> Decoder<'p> {
    pub(crate) fn new(program: &'p [u8]) -> Self {
        Self { program, cursor: 0 }
    }

    pub(crate) fn position(&self) -> usize {
        self.cursor
    }

    pub(crate) fn rewind(&mut self, position: usize) {
        debug_assert!(position <= self.program.len());
        self.cursor = position;
    }

    /// Returns the next hex digit's value, or `None` at the end of the program.
    pub(crate) fn next_nibble(&mut self) -> Option<u8> {
        while let Some(&byte) = self.program.get(self.cursor) {
            self.cursor += 1;
            if let Some(digit) = char::from(byte).to_digit(16) {
                return u8::try_from(digit).ok();
            }
        }
        None
    }

    pub(crate) fn next_op(&mut self) -> Option<OpCode> {
        self.next_nibble().map(OpCode::from_nibble)
    }

    pub(crate) fn next_instruction(&mut self) -> Option<Instruction> {
        let op = self.next_op()?;
        let operand = if op.has_operand() {
            self.next_nibble()
        } else {
            None
        };
        Some(Instruction { op, operand })
    }
}

/// Iterator over the instructions of a program, see [`disassemble`].
#[derive(Debug, Clone)]
pub struct Instructions<'p> {
    decoder: Decoder<'p>,
}

impl Iterator for Instructions<'_> {
    type Item = Instruction;

    fn next(&mut self) -> Option<Self::Item> {
        self.decoder.next_instruction()
    }
}

/// Decodes a program into its instruction sequence.
///
/// Decoding is purely linear: it shows what the interpreter would read, not
/// which instructions actually execute for a given hand.
///
/// ```
/// use pokerga_engine::vm;
///
/// let listing = vm::disassemble(b"00 A0 9 E")
///     .map(|inst| inst.to_string())
///     .collect::<Vec<_>>();
/// assert_eq!(listing, ["PUSH(0)", "READ(rank)", "RET", "UNK"]);
/// ```
#[must_use]
pub fn disassemble(program: &[u8]) -> Instructions<'_> {
    Instructions {
        decoder: Decoder::new(program),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noise_is_skipped() {
        let mut decoder = Decoder::new(b" x0-1\n;a");
        assert_eq!(decoder.next_nibble(), Some(0x0));
        assert_eq!(decoder.next_nibble(), Some(0x1));
        assert_eq!(decoder.next_nibble(), Some(0xA));
        assert_eq!(decoder.next_nibble(), None);
        assert_eq!(decoder.next_nibble(), None);
    }

    #[test]
    fn test_rewind() {
        let mut decoder = Decoder::new(b"0123");
        decoder.next_nibble();
        let mark = decoder.position();
        decoder.next_nibble();
        decoder.next_nibble();
        decoder.rewind(mark);
        assert_eq!(decoder.next_nibble(), Some(1));
    }

    #[test]
    fn test_truncated_operand() {
        let listing = disassemble(b"9B").collect::<Vec<_>>();
        assert_eq!(
            listing,
            [
                Instruction {
                    op: OpCode::Ret,
                    operand: None
                },
                Instruction {
                    op: OpCode::Count,
                    operand: None
                },
            ]
        );
        assert_eq!(listing[1].to_string(), "COUNT(?)");
    }

    #[test]
    fn test_operand_display() {
        let text = disassemble(b"0F A1 B2 C D")
            .map(|i| i.to_string())
            .collect::<Vec<_>>()
            .join(" ");
        assert_eq!(text, "PUSH(F) READ(suit) COUNT(rank) LOOP ENDLOOP");
    }
}
