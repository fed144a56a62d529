use std::fmt;

/// A VM instruction, decoded from a single hex nibble.
///
/// The table is flat: the nibble value is the opcode. `PUSH`, `READ` and
/// `COUNT` additionally consume the following nibble as their operand.
/// Nibbles `0xE` and `0xF` are not assigned and decode to [`OpCode::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::IsVariant)]
#[repr(u8)]
pub enum OpCode {
    Push = 0x0,
    Dup = 0x1,
    Drop = 0x2,
    Add = 0x3,
    Sub = 0x4,
    Cmp = 0x5,
    Not = 0x6,
    If = 0x7,
    EndIf = 0x8,
    Ret = 0x9,
    Read = 0xA,
    Count = 0xB,
    Loop = 0xC,
    EndLoop = 0xD,
    Unknown = 0xE,
}

impl OpCode {
    const TABLE: [OpCode; 16] = [
        OpCode::Push,
        OpCode::Dup,
        OpCode::Drop,
        OpCode::Add,
        OpCode::Sub,
        OpCode::Cmp,
        OpCode::Not,
        OpCode::If,
        OpCode::EndIf,
        OpCode::Ret,
        OpCode::Read,
        OpCode::Count,
        OpCode::Loop,
        OpCode::EndLoop,
        OpCode::Unknown,
        OpCode::Unknown,
    ];

    /// Decodes a nibble; anything outside the table is [`OpCode::Unknown`].
    #[must_use]
    pub fn from_nibble(nibble: u8) -> Self {
        Self::TABLE
            .get(usize::from(nibble))
            .copied()
            .unwrap_or(OpCode::Unknown)
    }

    /// Returns `true` if the instruction consumes an operand nibble.
    #[must_use]
    pub const fn has_operand(self) -> bool {
        matches!(self, OpCode::Push | OpCode::Read | OpCode::Count)
    }

    #[must_use]
    pub const fn mnemonic(self) -> &'static str {
        match self {
            OpCode::Push => "PUSH",
            OpCode::Dup => "DUP",
            OpCode::Drop => "DROP",
            OpCode::Add => "ADD",
            OpCode::Sub => "SUB",
            OpCode::Cmp => "CMP",
            OpCode::Not => "NOT",
            OpCode::If => "IF",
            OpCode::EndIf => "ENDIF",
            OpCode::Ret => "RET",
            OpCode::Read => "READ",
            OpCode::Count => "COUNT",
            OpCode::Loop => "LOOP",
            OpCode::EndLoop => "ENDLOOP",
            OpCode::Unknown => "UNK",
        }
    }
}

impl fmt::Display for OpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}
