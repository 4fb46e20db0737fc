use thumbscribe::condition::Condition;
use thumbscribe::error::EmitError;
use thumbscribe::ops::{arith, branch, mem, mov, stack};
use thumbscribe::registers::{LR, PC, R0, R1, R3, R4, R5, SP};
use thumbscribe::Writer;

#[test]
fn mov_immediate_then_return() {
    let mut buf = [0u8; 4];
    let mut w = Writer::new(&mut buf, 0x1000);
    mov::mov_reg_imm8(&mut w, R0, 42).unwrap();
    branch::bx_reg(&mut w, LR).unwrap();
    w.flush().unwrap();
    assert_eq!(buf, [0x2A, 0x20, 0x70, 0x47]);
}

#[test]
fn duplicate_literal_loads_share_one_pool_slot() {
    let mut buf = [0u8; 12];
    let mut w = Writer::new(&mut buf, 0x1000);
    mem::ldr_literal(&mut w, R0, 0xDEAD_BEEF).unwrap();
    mem::ldr_literal(&mut w, R1, 0xDEAD_BEEF).unwrap();
    branch::bx_reg(&mut w, LR).unwrap();
    w.flush().unwrap();

    // 6 bytes of code, a nop to 4-byte-align the pool, then one 4-byte slot.
    assert_eq!(w.offset(), 12);
    assert_eq!(buf[6..8], [0xC0, 0x46]);
    assert_eq!(buf[8..12], [0xEF, 0xBE, 0xAD, 0xDE]);
    // Both loads patched to the same +4-byte-aligned offset (field value 1).
    assert_eq!(buf[0..2], [0x01, 0x48]);
    assert_eq!(buf[2..4], [0x01, 0x49]);
}

#[test]
fn unresolved_label_fails_flush_but_resolved_one_succeeds() {
    let mut buf = [0u8; 8];
    let mut w = Writer::new(&mut buf, 0x1000);
    let l = w.new_label();
    branch::b_label(&mut w, l).unwrap();
    assert_eq!(w.flush(), Err(EmitError::UnresolvedLabel));

    let mut buf = [0u8; 8];
    let mut w = Writer::new(&mut buf, 0x1000);
    let l = w.new_label();
    branch::b_label(&mut w, l).unwrap();
    mov::mov_reg_imm8(&mut w, R0, 0).unwrap();
    w.define_label(l).unwrap();
    assert!(w.flush().is_ok());
}

#[test]
fn push_pop_low_and_special_narrow_encoding() {
    let mut buf = [0u8; 4];
    let mut w = Writer::new(&mut buf, 0x1000);
    stack::push(&mut w, &[R4, R5, LR]).unwrap();
    stack::pop(&mut w, &[R4, R5, PC]).unwrap();
    w.flush().unwrap();
    // push {r4,r5,lr}: mask 0x30, LR bit 0x100, base 0xB400 -> 0xB530.
    // pop  {r4,r5,pc}: mask 0x30, PC bit 0x100, base 0xBC00 -> 0xBD30.
    assert_eq!(buf, [0x30, 0xB5, 0x30, 0xBD]);
}

#[test]
fn add_dst_sp_immediate() {
    let mut buf = [0u8; 2];
    let mut w = Writer::new(&mut buf, 0x1000);
    arith::add_reg_reg_imm(&mut w, R0, SP, 16).unwrap();
    // base 0xA000, sp bit 0x800, dst r0 (<<8 = 0), imm/4 = 4.
    assert_eq!(buf, [0x04, 0xA8]);
}

#[test]
fn conditional_branch_short_distance() {
    let mut buf = [0u8; 6];
    let mut w = Writer::new(&mut buf, 0x1000);
    arith::cmp_reg_imm8(&mut w, R3, 7).unwrap();
    let l = w.new_label();
    branch::b_cond_label(&mut w, Condition::EQ, l).unwrap();
    thumbscribe::ops::misc::nop(&mut w).unwrap();
    w.define_label(l).unwrap();
    w.flush().unwrap();
    assert_eq!(buf[0..2], [0x07, 0x2B]);
    // beq's pc_at_fixup (insn+4) lands exactly on the label, so distance is 0.
    assert_eq!(buf[2..4], [0x00, 0xD0]);
    assert_eq!(buf[4..6], [0xC0, 0x46]);
}

#[test]
fn conditional_branch_at_extreme_signed_8_bit_distance_succeeds() {
    // Furthest forward reach: distance == 127 halfwords (254 bytes from pc+4).
    let mut buf = vec![0u8; 264];
    let mut w = Writer::new(&mut buf, 0x1000);
    let l = w.new_label();
    branch::b_cond_label(&mut w, Condition::EQ, l).unwrap();
    w.skip(256).unwrap();
    w.define_label(l).unwrap();
    assert!(w.flush().is_ok());
}

#[test]
fn conditional_branch_one_step_beyond_signed_8_bit_range_fails_flush() {
    let mut buf = vec![0u8; 264];
    let mut w = Writer::new(&mut buf, 0x1000);
    let l = w.new_label();
    branch::b_cond_label(&mut w, Condition::EQ, l).unwrap();
    w.skip(258).unwrap();
    w.define_label(l).unwrap();
    assert!(matches!(w.flush(), Err(EmitError::OperandOutOfRange(_))));
}

#[test]
fn cbz_forward_distance_boundaries() {
    // 126 bytes forward (distance == 63 halfwords) succeeds.
    let mut buf = vec![0u8; 140];
    let mut w = Writer::new(&mut buf, 0x1000);
    let l = w.new_label();
    branch::cbz(&mut w, R0, l).unwrap();
    w.skip(128).unwrap();
    w.define_label(l).unwrap();
    assert!(w.flush().is_ok());

    // One halfword further (distance == 64) must fail.
    let mut buf = vec![0u8; 140];
    let mut w = Writer::new(&mut buf, 0x1000);
    let l = w.new_label();
    branch::cbz(&mut w, R0, l).unwrap();
    w.skip(130).unwrap();
    w.define_label(l).unwrap();
    assert!(matches!(w.flush(), Err(EmitError::OperandOutOfRange(_))));
}

#[test]
fn wide_memory_transfer_round_trip() {
    let mut buf = [0u8; 4];
    let mut w = Writer::new(&mut buf, 0x1000);
    mem::ldr_offset(&mut w, R0, R1, 200).unwrap();
    assert_eq!(buf[0..2], [0xD1, 0xF8]);
    assert_eq!(buf[2..4], [0xC8, 0x00]);
}
