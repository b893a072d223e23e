//! Instruction programs
//!
//! A parsed pattern is lowered to a flat list of instructions before DFA
//! construction. The instruction set is deliberately tiny: consume a specific
//! word, consume any word, fork (`Alt`), jump, and report a match. `Alt` and
//! `Jump` arguments are offsets relative to the *next* instruction.

use super::syntax::Syntax;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Op {
    /// Match the specific word in `arg`.
    Word,
    /// Match any word.
    Any,
    /// Continue at both pc+1 and pc+1+arg.
    Alt,
    /// Continue at pc+1+arg.
    Jump,
    /// Completed match identified by `arg`.
    Match,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Inst {
    pub op: Op,
    pub arg: i32,
}

pub(crate) type Prog = Vec<Inst>;

/// Compiles `syntax` onto the end of `prog`; a successful run reports the
/// match value `match_id`.
pub(crate) fn compile(mut prog: Prog, syntax: &Syntax, match_id: i32) -> Prog {
    emit(&mut prog, syntax);
    prog.push(Inst {
        op: Op::Match,
        arg: match_id,
    });
    prog
}

/// Compiles a program matching any of the listed patterns; pattern `i`
/// reports match value `i`. The program head threads an `Alt` past each
/// pattern so every one is reachable from pc 0.
pub(crate) fn compile_multi(list: &[&Syntax]) -> Prog {
    let mut prog = Prog::new();
    for (i, syntax) in list.iter().enumerate() {
        let alt = if i + 1 < list.len() {
            prog.push(Inst {
                op: Op::Alt,
                arg: 0,
            });
            Some(prog.len() - 1)
        } else {
            None
        };
        prog = compile(prog, syntax, i as i32);
        if let Some(alt) = alt {
            prog[alt].arg = (prog.len() - (alt + 1)) as i32;
        }
    }
    prog
}

fn emit(prog: &mut Prog, syntax: &Syntax) {
    match syntax {
        Syntax::Empty => {}

        Syntax::Words(ws) => {
            for &w in ws {
                prog.push(Inst {
                    op: Op::Word,
                    arg: w,
                });
            }
        }

        Syntax::Concat(subs) => {
            for sub in subs {
                emit(prog, sub);
            }
        }

        Syntax::Quest(sub) => {
            let alt = prog.len();
            prog.push(Inst {
                op: Op::Alt,
                arg: 0,
            });
            emit(prog, sub);
            prog[alt].arg = (prog.len() - (alt + 1)) as i32;
        }

        Syntax::Alternate(subs) => {
            let mut alts = Vec::new();
            let mut jumps = Vec::new();
            for (i, sub) in subs.iter().enumerate() {
                if i + 1 < subs.len() {
                    alts.push(prog.len());
                    prog.push(Inst {
                        op: Op::Alt,
                        arg: 0,
                    });
                }
                emit(prog, sub);
                if i + 1 < subs.len() {
                    jumps.push(prog.len());
                    prog.push(Inst {
                        op: Op::Jump,
                        arg: 0,
                    });
                }
            }
            // Each alt skips its branch, landing just past the branch's jump.
            for (&alt, &jump) in alts.iter().zip(jumps.iter()) {
                prog[alt].arg = ((jump + 1) - (alt + 1)) as i32;
            }
            // All jumps land at the end.
            let end = prog.len();
            for &jump in &jumps {
                prog[jump].arg = (end - (jump + 1)) as i32;
            }
        }

        Syntax::Wild(n) => {
            // Compiled as (.(.(.)?)?)? rather than .?.?.? so the NFA state
            // set stays capped at two states no matter how large n is.
            let end = prog.len() + (*n as usize) * 2;
            for _ in 0..*n {
                prog.push(Inst {
                    op: Op::Alt,
                    arg: (end - (prog.len() + 1)) as i32,
                });
                prog.push(Inst { op: Op::Any, arg: 0 });
            }
        }
    }
}

/// Textual listing of a program, for tests and debugging.
#[cfg(test)]
pub(crate) fn prog_to_string(prog: &Prog, dict: &crate::dict::Dict) -> String {
    use std::fmt::Write;
    let mut out = String::new();
    for (i, inst) in prog.iter().enumerate() {
        let _ = match inst.op {
            Op::Word => writeln!(out, "{i}\tword {}", dict.words()[inst.arg as usize]),
            Op::Any => writeln!(out, "{i}\tany"),
            Op::Alt => writeln!(out, "{i}\talt {}", i as i32 + 1 + inst.arg),
            Op::Jump => writeln!(out, "{i}\tjump {}", i as i32 + 1 + inst.arg),
            Op::Match => writeln!(out, "{i}\tmatch {}", inst.arg),
        };
    }
    out
}

// ─── Tests ──────────────────────────────────────────────────────────
