//! Integration tests for instruction decoding.

use rvtile::isa::{decode, sign_extend, Category, Operands};

/// Tests subfield extraction on a representative R-type word.
#[test]
fn test_decode_subfields() {
    // add x3, x1, x2
    let decoded = decode(0x002081b3);
    assert_eq!(decoded.opcode, 0x33);
    assert_eq!(decoded.rd, 3);
    assert_eq!(decoded.funct3, 0);
    assert_eq!(decoded.rs1, 1);
    assert_eq!(decoded.rs2, 2);
    assert_eq!(decoded.funct7, 0);
}

/// Tests sign extension of narrow fields.
#[test]
fn test_sign_extend() {
    assert_eq!(sign_extend(0xfff, 12), -1);
    assert_eq!(sign_extend(0x800, 12), -2048);
    assert_eq!(sign_extend(0x7ff, 12), 2047);
    assert_eq!(sign_extend(0x1000, 13), -4096);
    assert_eq!(sign_extend(5, 12), 5);
}

/// Tests ADDI decoding.
#[test]
fn test_decode_addi() {
    // addi x1, x0, 5
    let decoded = decode(0x00500093);
    assert_eq!(decoded.category, Category::Alu);
    assert_eq!(
        decoded.operands,
        Operands::I {
            rd: 1,
            rs1: 0,
            imm: 5
        }
    );
}

/// Tests ADDI decoding with a negative immediate.
#[test]
fn test_decode_addi_negative() {
    // addi x1, x1, -1
    let decoded = decode(0xfff08093);
    assert_eq!(decoded.category, Category::Alu);
    assert_eq!(
        decoded.operands,
        Operands::I {
            rd: 1,
            rs1: 1,
            imm: -1
        }
    );
}

/// Tests ADD decoding.
#[test]
fn test_decode_add() {
    // add x2, x1, x3
    let decoded = decode(0x00308113);
    assert_eq!(decoded.category, Category::Alu);
    // 0x00308113 is actually addi x2, x1, 3
    assert_eq!(
        decoded.operands,
        Operands::I {
            rd: 2,
            rs1: 1,
            imm: 3
        }
    );

    let decoded = decode(0x002081b3);
    assert_eq!(decoded.category, Category::Alu);
    assert_eq!(
        decoded.operands,
        Operands::R {
            rd: 3,
            rs1: 1,
            rs2: 2
        }
    );
}

/// Tests SUB and SRA recognition through funct7.
#[test]
fn test_decode_funct7_variants() {
    // sub x1, x2, x3
    let decoded = decode(0x403100b3);
    assert_eq!(decoded.category, Category::Alu);
    assert_eq!(decoded.funct7, 0x20);

    // sra x1, x2, x3
    let decoded = decode(0x403150b3);
    assert_eq!(decoded.category, Category::Alu);
    assert_eq!(decoded.funct3, 5);
    assert_eq!(decoded.funct7, 0x20);

    // "mul" (funct7 = 1) is outside the subset
    let decoded = decode(0x023100b3);
    assert_eq!(decoded.category, Category::Unknown);
    assert_eq!(decoded.operands, Operands::None);
}

/// Tests shift-immediate decoding keeps the 5-bit shamt.
#[test]
fn test_decode_shift_immediates() {
    // slli x1, x2, 4
    let decoded = decode(0x00411093);
    assert_eq!(decoded.category, Category::Alu);
    assert_eq!(
        decoded.operands,
        Operands::I {
            rd: 1,
            rs1: 2,
            imm: 4
        }
    );

    // srai x1, x2, 4
    let decoded = decode(0x40415093);
    assert_eq!(decoded.category, Category::Alu);
    assert_eq!(
        decoded.operands,
        Operands::I {
            rd: 1,
            rs1: 2,
            imm: 4
        }
    );

    // srli/srai slot with a stray funct7 is not recognized
    let decoded = decode(0x20415093);
    assert_eq!(decoded.category, Category::Unknown);
}

/// Tests LW decoding and the rejection of other load widths.
#[test]
fn test_decode_loads() {
    // lw x14, 0(x6)
    let decoded = decode(0x00032703);
    assert_eq!(decoded.category, Category::Load);
    assert_eq!(
        decoded.operands,
        Operands::I {
            rd: 14,
            rs1: 6,
            imm: 0
        }
    );

    // lb (funct3 = 0) is outside the subset
    let decoded = decode(0x00030703);
    assert_eq!(decoded.category, Category::Unknown);
}

/// Tests SW decoding, including the split immediate.
#[test]
fn test_decode_stores() {
    // sw x14, 0(x6)
    let decoded = decode(0x00e32023);
    assert_eq!(decoded.category, Category::Store);
    assert_eq!(
        decoded.operands,
        Operands::S {
            rs1: 6,
            rs2: 14,
            imm: 0
        }
    );

    // sw x2, -4(x1)
    let decoded = decode(0xfe20ae23);
    assert_eq!(
        decoded.operands,
        Operands::S {
            rs1: 1,
            rs2: 2,
            imm: -4
        }
    );

    // sh is outside the subset
    let decoded = decode(0x00e31023);
    assert_eq!(decoded.category, Category::Unknown);
}

/// Tests branch decoding and the 13-bit offset assembly.
#[test]
fn test_decode_branches() {
    // beq x1, x2, +8
    let decoded = decode(0x00208463);
    assert_eq!(decoded.category, Category::Branch);
    assert_eq!(
        decoded.operands,
        Operands::B {
            rs1: 1,
            rs2: 2,
            imm: 8
        }
    );

    // blt x5, x7, -24
    let decoded = decode(0xfe72c4e3);
    assert_eq!(decoded.category, Category::Branch);
    assert_eq!(decoded.funct3, 4);
    assert_eq!(
        decoded.operands,
        Operands::B {
            rs1: 5,
            rs2: 7,
            imm: -24
        }
    );

    // bge (funct3 = 5) is outside the subset
    let decoded = decode(0x00215463);
    assert_eq!(decoded.category, Category::Unknown);
}

/// Tests LUI and AUIPC decoding.
#[test]
fn test_decode_upper_immediates() {
    // lui x1, 0x12345
    let decoded = decode(0x123450b7);
    assert_eq!(decoded.category, Category::Alu);
    assert_eq!(
        decoded.operands,
        Operands::U {
            rd: 1,
            imm: 0x12345000
        }
    );

    // auipc x2, 0x80000 (negative as i32)
    let decoded = decode(0x80000117);
    assert_eq!(
        decoded.operands,
        Operands::U {
            rd: 2,
            imm: 0x80000000u32 as i32
        }
    );
}

/// Tests JAL decoding and the 21-bit offset assembly.
#[test]
fn test_decode_jal() {
    // jal x1, +2048
    let decoded = decode(0x001000ef);
    assert_eq!(decoded.category, Category::Jump);
    assert_eq!(
        decoded.operands,
        Operands::J {
            rd: 1,
            imm: 2048
        }
    );

    // jal x0, 0 (spin)
    let decoded = decode(0x0000006f);
    assert_eq!(decoded.operands, Operands::J { rd: 0, imm: 0 });

    // jal x0, -4
    let decoded = decode(0xffdff06f);
    assert_eq!(decoded.operands, Operands::J { rd: 0, imm: -4 });
}

/// Tests JALR decoding.
#[test]
fn test_decode_jalr() {
    // jalr x0, 0(x1)
    let decoded = decode(0x00008067);
    assert_eq!(decoded.category, Category::Jump);
    assert_eq!(
        decoded.operands,
        Operands::I {
            rd: 0,
            rs1: 1,
            imm: 0
        }
    );

    // jalr with funct3 != 0 is outside the subset
    let decoded = decode(0x00009067);
    assert_eq!(decoded.category, Category::Unknown);
}

/// Tests the five recognized privileged system encodings.
#[test]
fn test_decode_system() {
    for (word, imm) in [
        (0x00000073u32, 0x000),
        (0x00100073, 0x001),
        (0x00200073, 0x002),
        (0x10200073, 0x102),
        (0x30200073, 0x302),
    ] {
        let decoded = decode(word);
        assert_eq!(decoded.category, Category::System, "word {:#010x}", word);
        assert_eq!(
            decoded.operands,
            Operands::I {
                rd: 0,
                rs1: 0,
                imm
            },
            "word {:#010x}",
            word
        );
    }

    // wfi (imm12 = 0x105) is outside the subset
    let decoded = decode(0x10500073);
    assert_eq!(decoded.category, Category::Unknown);
}

/// Tests CSR register-form decoding.
#[test]
fn test_decode_csr() {
    // csrrw x1, mstatus, x2
    let decoded = decode(0x300110f3);
    assert_eq!(decoded.category, Category::Csr);
    assert_eq!(
        decoded.operands,
        Operands::Csr {
            rd: 1,
            rs1: 2,
            csr: 0x300
        }
    );

    // csrrs x0, mcause, x0
    let decoded = decode(0x34202073);
    assert_eq!(decoded.category, Category::Csr);
    assert_eq!(
        decoded.operands,
        Operands::Csr {
            rd: 0,
            rs1: 0,
            csr: 0x342
        }
    );
}

/// Tests CSR immediate-form decoding takes zimm from the rs1 field.
#[test]
fn test_decode_csr_immediate() {
    // csrrwi x1, mtvec, 5
    let decoded = decode(0x3052d0f3);
    assert_eq!(decoded.category, Category::CsrImm);
    assert_eq!(
        decoded.operands,
        Operands::CsrImm {
            rd: 1,
            zimm: 5,
            csr: 0x305
        }
    );

    // csrrci x0, mstatus, 8
    let decoded = decode(0x30047073);
    assert_eq!(decoded.category, Category::CsrImm);
    assert_eq!(
        decoded.operands,
        Operands::CsrImm {
            rd: 0,
            zimm: 8,
            csr: 0x300
        }
    );
}

/// Tests CUSTOM-0 decodes as R-type regardless of funct fields.
#[test]
fn test_decode_custom0() {
    // funct3/funct7 are the accelerator's business
    let decoded = decode(0x0020808b);
    assert_eq!(decoded.category, Category::Custom);
    assert_eq!(
        decoded.operands,
        Operands::R {
            rd: 1,
            rs1: 1,
            rs2: 2
        }
    );

    let decoded = decode(0x7ff7f78b);
    assert_eq!(decoded.category, Category::Custom);
}

/// Tests that unrecognized encodings decode as Unknown rather than failing.
#[test]
fn test_decode_unknown_total() {
    for word in [
        0x00000000u32, // all zeros
        0xffffffff,    // all ones
        0x0000000f,    // fence
        0x02000033,    // mul
        0x00004073,    // gap in the SYSTEM funct3 space
        0x00001023,    // sh-width store
        0x0000a0af,    // amo opcode
    ] {
        let decoded = decode(word);
        assert_eq!(decoded.raw, word);
        assert_eq!(decoded.category, Category::Unknown, "word {:#010x}", word);
        assert_eq!(decoded.operands, Operands::None, "word {:#010x}", word);
    }
}

/// Tests the decoder is deterministic.
#[test]
fn test_decode_deterministic() {
    for word in [0x00500093u32, 0xfe72c4e3, 0x00100073, 0xdeadbeef] {
        assert_eq!(decode(word), decode(word));
    }
}
