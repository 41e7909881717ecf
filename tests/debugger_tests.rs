//! Unit tests for the debugger command grammar.

use rvtile::sim::debugger::{parse_command, parse_u32, Command, RegsTarget};

/// Tests numeric literals parse in decimal and prefixed hex.
#[test]
fn test_parse_u32() {
    assert_eq!(parse_u32("0"), Some(0));
    assert_eq!(parse_u32("42"), Some(42));
    assert_eq!(parse_u32("0x10"), Some(16));
    assert_eq!(parse_u32("0X10"), Some(16));
    assert_eq!(parse_u32("0xffffffff"), Some(u32::MAX));
    assert_eq!(parse_u32("4294967295"), Some(u32::MAX));

    assert_eq!(parse_u32("4294967296"), None); // overflows
    assert_eq!(parse_u32("0x100000000"), None);
    assert_eq!(parse_u32("-1"), None);
    assert_eq!(parse_u32("abc"), None);
    assert_eq!(parse_u32("0x"), None);
    assert_eq!(parse_u32(""), None);
}

/// Tests the step command and its count argument.
#[test]
fn test_parse_step() {
    assert_eq!(parse_command("step"), Ok(Command::Step(1)));
    assert_eq!(parse_command("step 5"), Ok(Command::Step(5)));
    assert_eq!(parse_command("step 0x10"), Ok(Command::Step(16)));
    assert_eq!(
        parse_command("step 0"),
        Err("Invalid step count".to_string())
    );
    assert_eq!(
        parse_command("step ten"),
        Err("Invalid step count".to_string())
    );
}

/// Tests cont and its long alias.
#[test]
fn test_parse_cont() {
    assert_eq!(parse_command("cont"), Ok(Command::Cont));
    assert_eq!(parse_command("continue"), Ok(Command::Cont));
}

/// Tests breakpoint management commands.
#[test]
fn test_parse_breakpoints() {
    assert_eq!(parse_command("break"), Ok(Command::Break(None)));
    assert_eq!(parse_command("break 0x40"), Ok(Command::Break(Some(0x40))));
    assert_eq!(parse_command("br 64"), Ok(Command::Break(Some(64))));
    assert_eq!(
        parse_command("break zzz"),
        Err("Invalid address".to_string())
    );

    assert_eq!(parse_command("delete 0x40"), Ok(Command::Delete(0x40)));
    assert_eq!(parse_command("del 4"), Ok(Command::Delete(4)));
    assert_eq!(
        parse_command("delete"),
        Err("Usage: delete <addr>".to_string())
    );

    assert_eq!(parse_command("clear"), Ok(Command::Clear));
}

/// Tests the three regs target forms.
#[test]
fn test_parse_regs() {
    assert_eq!(parse_command("regs"), Ok(Command::Regs(RegsTarget::All)));
    assert_eq!(
        parse_command("regs 1"),
        Ok(Command::Regs(RegsTarget::Thread(1)))
    );
    assert_eq!(
        parse_command("regs 0:14"),
        Ok(Command::Regs(RegsTarget::Register(0, 14)))
    );
    assert_eq!(
        parse_command("regs x"),
        Err("Invalid thread index".to_string())
    );
    assert_eq!(
        parse_command("regs 0:ra"),
        Err("Invalid register index".to_string())
    );
    // Range checks happen at display time; parsing accepts any index.
    assert_eq!(
        parse_command("regs 7"),
        Ok(Command::Regs(RegsTarget::Thread(7)))
    );
}

/// Tests the mem command and its default count.
#[test]
fn test_parse_mem() {
    assert_eq!(
        parse_command("mem 0x100"),
        Ok(Command::Mem {
            addr: 0x100,
            count: 4
        })
    );
    assert_eq!(
        parse_command("mem 0x100 8"),
        Ok(Command::Mem {
            addr: 0x100,
            count: 8
        })
    );
    assert_eq!(
        parse_command("mem"),
        Err("Usage: mem <addr> [count]".to_string())
    );
    assert_eq!(parse_command("mem zzz"), Err("Invalid address".to_string()));
    assert_eq!(
        parse_command("mem 0x100 zzz"),
        Err("Invalid count".to_string())
    );
    assert_eq!(
        parse_command("mem 0x100 0"),
        Err("Count must be greater than zero".to_string())
    );
}

/// Tests the trace command's set and toggle forms.
#[test]
fn test_parse_trace() {
    assert_eq!(parse_command("trace"), Ok(Command::Trace(None)));
    assert_eq!(parse_command("trace on"), Ok(Command::Trace(Some(true))));
    assert_eq!(parse_command("trace off"), Ok(Command::Trace(Some(false))));
    assert_eq!(parse_command("trace ON"), Ok(Command::Trace(Some(true))));
    assert_eq!(
        parse_command("trace maybe"),
        Err("Usage: trace [on|off]".to_string())
    );
}

/// Tests quit, help, and their aliases.
#[test]
fn test_parse_quit_help() {
    assert_eq!(parse_command("quit"), Ok(Command::Quit));
    assert_eq!(parse_command("q"), Ok(Command::Quit));
    assert_eq!(parse_command("help"), Ok(Command::Help));
}

/// Tests command words are case-insensitive.
#[test]
fn test_parse_case_insensitive() {
    assert_eq!(parse_command("STEP 3"), Ok(Command::Step(3)));
    assert_eq!(parse_command("Cont"), Ok(Command::Cont));
    assert_eq!(parse_command("BREAK 0x10"), Ok(Command::Break(Some(0x10))));
}

/// Tests surrounding whitespace and trailing tokens are ignored.
#[test]
fn test_parse_whitespace_and_extras() {
    assert_eq!(parse_command("  step   2  "), Ok(Command::Step(2)));
    assert_eq!(parse_command("step 2 extra junk"), Ok(Command::Step(2)));
    assert_eq!(parse_command("clear now please"), Ok(Command::Clear));
}

/// Tests empty and unknown input produce distinct errors.
#[test]
fn test_parse_errors() {
    assert_eq!(parse_command(""), Err("Empty command".to_string()));
    assert_eq!(parse_command("   "), Err("Empty command".to_string()));
    assert_eq!(
        parse_command("frobnicate"),
        Err("Unknown command: frobnicate".to_string())
    );
    // The original casing is echoed back.
    assert_eq!(
        parse_command("Frobnicate"),
        Err("Unknown command: Frobnicate".to_string())
    );
}
