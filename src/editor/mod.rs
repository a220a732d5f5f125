//! Selective Text Enhancement Engine
//!
//! Everything needed to propose, review and commit an AI rewrite of part of
//! a document, without any I/O:
//!
//! - **`tokenizer`** - lossless word/whitespace tokenization
//! - **`diff`** - edit scripts between token sequences (greedy and LCS)
//! - **`render`** - display segments and word-diff markup
//! - **`selection`** - selection capture and splice-point lookup
//! - **`patch`** - pending patches and their application
//! - **`controller`** - the state machine that ties the above together

pub mod controller;
pub mod diff;
pub mod patch;
pub mod render;
pub mod selection;
pub mod tokenizer;

pub use controller::{
    Command, ControllerConfig, EnhanceController, EnhancePhase, EnhanceState, Event,
    PendingRequest, RewriteOutcome, RewriteTicket,
};
pub use diff::{
    diff, diff_text, DiffStats, DiffStrategy, Edit, EditKind, EditScript, GreedyLookahead,
    LongestCommonSubsequence,
};
pub use patch::{PatchOrigin, PendingPatch};
pub use render::{render, render_coalesced, to_markup, DiffSegment};
pub use selection::Selection;
pub use tokenizer::{tokenize, Token, TokenKind};
