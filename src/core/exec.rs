//! Instruction Semantics.
//!
//! One entry point, `execute`, dispatched on the decoded category and
//! operand format. Every path reduces to an `ExecOutcome` that the tick
//! driver applies to the program counter; no instruction mutates the pc
//! directly. All arithmetic wraps.

use crate::core::arch::mode::PrivilegeMode;
use crate::core::arch::trap::TrapCause;
use crate::core::Cpu;
use crate::isa::instruction::{Category, Instruction, Operands};
use crate::isa::{abi, opcodes};
use crate::soc::ports::SharedMemory;

/// What executing one instruction decided about control flow.
///
/// `Continue` carries the next pc (fall-through or a computed target),
/// `Trap` enters the handler through the full trap sequence, `ReturnTo`
/// redirects to a trap-return target, and `Exit` latches the program-exit
/// protocol with the pc left in place.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExecOutcome {
    Continue(u32),
    Trap(TrapCause),
    ReturnTo(u32),
    Exit(u32),
}

/// Executes one decoded instruction at `pc`.
pub fn execute(cpu: &mut Cpu, mem: &SharedMemory, inst: &Instruction, pc: u32) -> ExecOutcome {
    let next = pc.wrapping_add(4);

    match (inst.category, inst.operands) {
        (Category::Alu, Operands::R { rd, rs1, rs2 }) => {
            let a = cpu.read_reg(rs1);
            let b = cpu.read_reg(rs2);
            cpu.write_reg(rd, alu_reg(inst.funct3, inst.funct7, a, b));
            ExecOutcome::Continue(next)
        }

        (Category::Alu, Operands::I { rd, rs1, imm }) => {
            let a = cpu.read_reg(rs1);
            cpu.write_reg(rd, alu_imm(inst.funct3, inst.funct7, a, imm));
            ExecOutcome::Continue(next)
        }

        (Category::Alu, Operands::U { rd, imm }) => {
            let val = if inst.opcode == opcodes::OP_LUI {
                imm as u32
            } else {
                pc.wrapping_add(imm as u32)
            };
            cpu.write_reg(rd, val);
            ExecOutcome::Continue(next)
        }

        (Category::Load, Operands::I { rd, rs1, imm }) => {
            let addr = cpu.read_reg(rs1).wrapping_add(imm as u32);
            let val = mem.borrow_mut().read32(addr);
            cpu.write_reg(rd, val);
            ExecOutcome::Continue(next)
        }

        (Category::Store, Operands::S { rs1, rs2, imm }) => {
            let addr = cpu.read_reg(rs1).wrapping_add(imm as u32);
            let val = cpu.read_reg(rs2);
            mem.borrow_mut().write32(addr, val);
            ExecOutcome::Continue(next)
        }

        (Category::Branch, Operands::B { rs1, rs2, imm }) => {
            let a = cpu.read_reg(rs1);
            let b = cpu.read_reg(rs2);
            let taken = match inst.funct3 {
                opcodes::F3_BEQ => a == b,
                opcodes::F3_BNE => a != b,
                // BLT; the decoder admits no other funct3 here.
                _ => (a as i32) < (b as i32),
            };
            if taken {
                ExecOutcome::Continue(pc.wrapping_add(imm as u32))
            } else {
                ExecOutcome::Continue(next)
            }
        }

        (Category::Jump, Operands::J { rd, imm }) => {
            cpu.write_reg(rd, next);
            ExecOutcome::Continue(pc.wrapping_add(imm as u32))
        }

        (Category::Jump, Operands::I { rd, rs1, imm }) => {
            // Base read precedes the link write so jalr with rd == rs1
            // targets the old register value.
            let target = cpu.read_reg(rs1).wrapping_add(imm as u32) & !1;
            cpu.write_reg(rd, next);
            ExecOutcome::Continue(target)
        }

        (Category::System, Operands::I { imm, .. }) => exec_system(cpu, imm as u32),

        (Category::Csr, Operands::Csr { rd, rs1, csr }) => {
            let src = cpu.read_reg(rs1);
            exec_csr(cpu, inst.funct3, rd, csr, src, rs1 == 0);
            ExecOutcome::Continue(next)
        }

        (Category::CsrImm, Operands::CsrImm { rd, zimm, csr }) => {
            // funct3 5/6/7 mirror the register forms 1/2/3.
            exec_csr(cpu, inst.funct3 & 0x3, rd, csr, zimm, zimm == 0);
            ExecOutcome::Continue(next)
        }

        (Category::Custom, Operands::R { rd, rs1, rs2 }) => {
            exec_custom(cpu, inst.raw, pc, rd, rs1, rs2, next)
        }

        // Unrecognized encodings execute as a no-op and fall through.
        _ => ExecOutcome::Continue(next),
    }
}

fn alu_reg(funct3: u32, funct7: u32, a: u32, b: u32) -> u32 {
    let sh = b & 0x1f;
    match (funct3, funct7) {
        (0x0, opcodes::F7_BASE) => a.wrapping_add(b),
        (0x0, _) => a.wrapping_sub(b),
        (0x1, _) => a.wrapping_shl(sh),
        (0x2, _) => ((a as i32) < (b as i32)) as u32,
        (0x3, _) => (a < b) as u32,
        (0x4, _) => a ^ b,
        (0x5, opcodes::F7_BASE) => a.wrapping_shr(sh),
        (0x5, _) => ((a as i32) >> sh) as u32,
        (0x6, _) => a | b,
        _ => a & b,
    }
}

fn alu_imm(funct3: u32, funct7: u32, a: u32, imm: i32) -> u32 {
    let b = imm as u32;
    match funct3 {
        0x0 => a.wrapping_add(b),
        0x1 => a.wrapping_shl(b & 0x1f),
        0x2 => ((a as i32) < imm) as u32,
        0x3 => (a < b) as u32,
        0x4 => a ^ b,
        0x5 => {
            if funct7 == opcodes::F7_ALT {
                ((a as i32) >> (b & 0x1f)) as u32
            } else {
                a.wrapping_shr(b & 0x1f)
            }
        }
        0x6 => a | b,
        _ => a & b,
    }
}

/// Privileged system instructions, selected by the imm12 field.
fn exec_system(cpu: &mut Cpu, op: u32) -> ExecOutcome {
    match op {
        opcodes::PRIV_ECALL => {
            // The exit protocol outranks the trap path: a7 == 93 halts the
            // tile with a0 as the exit code and no trap is taken.
            if cpu.read_reg(abi::REG_A7) == abi::SYS_EXIT {
                return ExecOutcome::Exit(cpu.read_reg(abi::REG_A0));
            }
            ExecOutcome::Trap(match cpu.privilege {
                PrivilegeMode::User => TrapCause::EnvironmentCallFromU,
                PrivilegeMode::Supervisor => TrapCause::EnvironmentCallFromS,
                PrivilegeMode::Machine => TrapCause::EnvironmentCallFromM,
            })
        }
        opcodes::PRIV_EBREAK => ExecOutcome::Trap(TrapCause::Breakpoint),
        opcodes::PRIV_URET => exec_xret(cpu, PrivilegeMode::User),
        opcodes::PRIV_SRET => exec_xret(cpu, PrivilegeMode::Supervisor),
        opcodes::PRIV_MRET => exec_xret(cpu, PrivilegeMode::Machine),
        _ => ExecOutcome::Trap(TrapCause::IllegalInstruction),
    }
}

/// Trap return. Each xret form is legal only at exactly its own privilege
/// level; anywhere else it is an illegal instruction.
fn exec_xret(cpu: &mut Cpu, required: PrivilegeMode) -> ExecOutcome {
    if cpu.privilege != required {
        return ExecOutcome::Trap(TrapCause::IllegalInstruction);
    }
    ExecOutcome::ReturnTo(cpu.resume_from_trap())
}

/// Shared body of the six CSR instructions.
///
/// The old value is read first and written to rd unless rd is x0. CSRRW
/// always writes the CSR; the set/clear forms skip the write when the
/// source operand is x0 (register form) or a zero immediate.
fn exec_csr(cpu: &mut Cpu, op: u32, rd: usize, csr: u32, src: u32, src_is_zero: bool) {
    let old = cpu.csr_read(csr);
    if rd != 0 {
        cpu.write_reg(rd, old);
    }
    match op {
        opcodes::F3_CSRRW => cpu.csr_write(csr, src),
        opcodes::F3_CSRRS => {
            if !src_is_zero {
                cpu.csr_write(csr, old | src);
            }
        }
        _ => {
            if !src_is_zero {
                cpu.csr_write(csr, old & !src);
            }
        }
    }
}

/// CUSTOM-0 dispatch to the attached accelerator.
///
/// Without an accelerator the opcode is illegal. The response, if the
/// accelerator reports one, lands in rd; a response aimed at x0 is left
/// pending in the accelerator.
fn exec_custom(
    cpu: &mut Cpu,
    raw: u32,
    pc: u32,
    rd: usize,
    rs1: usize,
    rs2: usize,
    next: u32,
) -> ExecOutcome {
    let Some(accel) = cpu.accel() else {
        return ExecOutcome::Trap(TrapCause::IllegalInstruction);
    };

    let a = cpu.read_reg(rs1);
    let b = cpu.read_reg(rs2);
    accel.borrow_mut().issue(raw, pc, a, b);

    let responded = accel.borrow().has_response();
    if responded && rd != 0 {
        let val = accel.borrow_mut().read_response();
        cpu.write_reg(rd, val);
    }
    ExecOutcome::Continue(next)
}
