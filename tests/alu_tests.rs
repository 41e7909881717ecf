//! Integration tests for ALU, memory, and control-flow execution.

use std::cell::RefCell;
use std::rc::Rc;

use rvtile::core::Cpu;
use rvtile::soc::{FlatMemory, SharedMemory};

/// Builds an engine over a 4 KiB flat memory preloaded with `words` at 0.
fn cpu_with_program(words: &[u32]) -> (Cpu, SharedMemory) {
    let mem: SharedMemory = Rc::new(RefCell::new(FlatMemory::new(0x1000)));
    for (i, word) in words.iter().enumerate() {
        mem.borrow_mut().write32((i * 4) as u32, *word);
    }
    let mut cpu = Cpu::new();
    cpu.attach_memory(mem.clone());
    (cpu, mem)
}

/// Runs the engine for `n` ticks.
fn run(cpu: &mut Cpu, n: usize) {
    for _ in 0..n {
        cpu.tick();
    }
}

/// Tests ADDI with positive and negative immediates.
#[test]
fn test_addi() {
    let (mut cpu, _mem) = cpu_with_program(&[
        0x00500093, // addi x1, x0, 5
        0xffd00113, // addi x2, x0, -3
    ]);
    run(&mut cpu, 2);
    assert_eq!(cpu.read_reg(1), 5);
    assert_eq!(cpu.read_reg(2), 0xffff_fffd);
    assert_eq!(cpu.pc, 8);
}

/// Tests register-register ADD and SUB.
#[test]
fn test_add_sub() {
    let (mut cpu, _mem) = cpu_with_program(&[
        0x00500093, // addi x1, x0, 5
        0x00300113, // addi x2, x0, 3
        0x002081b3, // add  x3, x1, x2
        0x40208233, // sub  x4, x1, x2
    ]);
    run(&mut cpu, 4);
    assert_eq!(cpu.read_reg(3), 8);
    assert_eq!(cpu.read_reg(4), 2);
}

/// Tests XOR, OR, and AND register forms.
#[test]
fn test_logic_ops() {
    let (mut cpu, _mem) = cpu_with_program(&[
        0x00c00093, // addi x1, x0, 12
        0x00a00113, // addi x2, x0, 10
        0x0020c1b3, // xor  x3, x1, x2
        0x0020e233, // or   x4, x1, x2
        0x0020f2b3, // and  x5, x1, x2
    ]);
    run(&mut cpu, 5);
    assert_eq!(cpu.read_reg(3), 6);
    assert_eq!(cpu.read_reg(4), 14);
    assert_eq!(cpu.read_reg(5), 8);
}

/// Tests SLL/SRL/SRA mask the shift amount to five bits.
#[test]
fn test_shift_ops() {
    let (mut cpu, _mem) = cpu_with_program(&[
        0x800000b7, // lui  x1, 0x80000
        0x00108093, // addi x1, x1, 1      -> x1 = 0x8000_0001
        0x02100113, // addi x2, x0, 33     -> shift amount masks to 1
        0x002091b3, // sll  x3, x1, x2
        0x0020d233, // srl  x4, x1, x2
        0x4020d2b3, // sra  x5, x1, x2
    ]);
    run(&mut cpu, 6);
    assert_eq!(cpu.read_reg(3), 0x0000_0002);
    assert_eq!(cpu.read_reg(4), 0x4000_0000);
    assert_eq!(cpu.read_reg(5), 0xc000_0000);
}

/// Tests SLT is signed and SLTU is unsigned.
#[test]
fn test_set_less_than() {
    let (mut cpu, _mem) = cpu_with_program(&[
        0xfff00093, // addi x1, x0, -1
        0x00100113, // addi x2, x0, 1
        0x0020a1b3, // slt  x3, x1, x2
        0x0020b233, // sltu x4, x1, x2
        0x001122b3, // slt  x5, x2, x1
    ]);
    run(&mut cpu, 5);
    assert_eq!(cpu.read_reg(3), 1); // -1 < 1 signed
    assert_eq!(cpu.read_reg(4), 0); // 0xffff_ffff > 1 unsigned
    assert_eq!(cpu.read_reg(5), 0);
}

/// Tests XORI, ORI, and ANDI.
#[test]
fn test_immediate_logic() {
    let (mut cpu, _mem) = cpu_with_program(&[
        0x0f000093, // addi x1, x0, 0xf0
        0x0ff0c113, // xori x2, x1, 0xff
        0x00f0e193, // ori  x3, x1, 0x0f
        0x03c0f213, // andi x4, x1, 0x3c
    ]);
    run(&mut cpu, 4);
    assert_eq!(cpu.read_reg(2), 0x0f);
    assert_eq!(cpu.read_reg(3), 0xff);
    assert_eq!(cpu.read_reg(4), 0x30);
}

/// Tests SLLI, SRLI, and SRAI.
#[test]
fn test_shift_immediates() {
    let (mut cpu, _mem) = cpu_with_program(&[
        0x800000b7, // lui  x1, 0x80000
        0x00109113, // slli x2, x1, 1
        0x0040d193, // srli x3, x1, 4
        0x4040d213, // srai x4, x1, 4
    ]);
    run(&mut cpu, 4);
    assert_eq!(cpu.read_reg(2), 0);
    assert_eq!(cpu.read_reg(3), 0x0800_0000);
    assert_eq!(cpu.read_reg(4), 0xf800_0000);
}

/// Tests SLTI and SLTIU with a negative source.
#[test]
fn test_slti_sltiu() {
    let (mut cpu, _mem) = cpu_with_program(&[
        0xffb00093, // addi  x1, x0, -5
        0x0000a113, // slti  x2, x1, 0
        0x00a0b193, // sltiu x3, x1, 10
    ]);
    run(&mut cpu, 3);
    assert_eq!(cpu.read_reg(2), 1); // -5 < 0 signed
    assert_eq!(cpu.read_reg(3), 0); // 0xffff_fffb >= 10 unsigned
}

/// Tests LUI and pc-relative AUIPC.
#[test]
fn test_lui_auipc() {
    let (mut cpu, _mem) = cpu_with_program(&[
        0x123450b7, // lui   x1, 0x12345
        0x00001117, // auipc x2, 0x1
    ]);
    run(&mut cpu, 2);
    assert_eq!(cpu.read_reg(1), 0x1234_5000);
    assert_eq!(cpu.read_reg(2), 0x0000_1004); // pc 4 + 0x1000
}

/// Tests SW followed by LW round-trips through memory.
#[test]
fn test_load_store() {
    let (mut cpu, mem) = cpu_with_program(&[
        0x0ab00093, // addi x1, x0, 0xab
        0x10102023, // sw   x1, 0x100(x0)
        0x10002103, // lw   x2, 0x100(x0)
    ]);
    run(&mut cpu, 3);
    assert_eq!(cpu.read_reg(2), 0xab);
    assert_eq!(mem.borrow_mut().read32(0x100), 0xab);
}

/// Tests taken and not-taken branches redirect or fall through.
#[test]
fn test_branches() {
    let (mut cpu, _mem) = cpu_with_program(&[
        0x00100093, // addi x1, x0, 1
        0x00008463, // beq  x1, x0, +8   (not taken)
        0x00009463, // bne  x1, x0, +8   (taken)
        0x06300113, // addi x2, x0, 99   (skipped)
        0x00104463, // blt  x0, x1, +8   (taken)
        0x06300193, // addi x3, x0, 99   (skipped)
        0x00700213, // addi x4, x0, 7
    ]);
    run(&mut cpu, 5);
    assert_eq!(cpu.read_reg(2), 0);
    assert_eq!(cpu.read_reg(3), 0);
    assert_eq!(cpu.read_reg(4), 7);
    assert_eq!(cpu.pc, 28);
}

/// Tests JAL links pc+4 and redirects.
#[test]
fn test_jal_link() {
    let (mut cpu, _mem) = cpu_with_program(&[
        0x008000ef, // jal  x1, +8
        0x06300113, // addi x2, x0, 99   (skipped)
        0x00100193, // addi x3, x0, 1
    ]);
    run(&mut cpu, 2);
    assert_eq!(cpu.read_reg(1), 4);
    assert_eq!(cpu.read_reg(2), 0);
    assert_eq!(cpu.read_reg(3), 1);
}

/// Tests JALR with rd == rs1 targets the pre-link register value.
#[test]
fn test_jalr_rd_eq_rs1() {
    let (mut cpu, _mem) = cpu_with_program(&[
        0x01000093, // addi x1, x0, 16
        0x004080e7, // jalr x1, 4(x1)    -> target 20, link 8
        0x00000000,
        0x00000000,
        0x00000000,
        0x00100113, // addi x2, x0, 1    (at 20)
    ]);
    run(&mut cpu, 3);
    assert_eq!(cpu.read_reg(1), 8);
    assert_eq!(cpu.read_reg(2), 1);
    assert_eq!(cpu.pc, 24);
}

/// Tests JALR clears the low bit of the computed target.
#[test]
fn test_jalr_clears_low_bit() {
    let (mut cpu, _mem) = cpu_with_program(&[
        0x00900093, // addi x1, x0, 9
        0x00008067, // jalr x0, 0(x1)    -> target 9 & !1 = 8
        0x00100113, // addi x2, x0, 1    (at 8)
    ]);
    run(&mut cpu, 3);
    assert_eq!(cpu.read_reg(2), 1);
    assert_eq!(cpu.pc, 12);
}

/// Tests writes to x0 are dropped.
#[test]
fn test_x0_write_dropped() {
    let (mut cpu, _mem) = cpu_with_program(&[
        0x00500013, // addi x0, x0, 5
        0x12345037, // lui  x0, 0x12345
    ]);
    run(&mut cpu, 2);
    assert_eq!(cpu.read_reg(0), 0);
}

/// Tests addition wraps on overflow.
#[test]
fn test_wrapping_arithmetic() {
    let (mut cpu, _mem) = cpu_with_program(&[
        0x800000b7, // lui  x1, 0x80000
        0xfff08093, // addi x1, x1, -1   -> x1 = 0x7fff_ffff
        0x00108133, // add  x2, x1, x1
    ]);
    run(&mut cpu, 3);
    assert_eq!(cpu.read_reg(2), 0xffff_fffe);
}
