//! UCI Protocol Tests
//!
//! These tests drive the host front-end line by line and check its output.

use shakmaty::uci::UciMove;
use shakmaty::{Chess, Position};
use std::fs;
use std::path::PathBuf;
use zobrist_keys::hashing::stream::DEFAULT_SEED;
use zobrist_keys::hashing::{RandomConstantTable, compute_full_key};
use zobrist_keys::loader::TableConfig;
use zobrist_keys::uci::{MAX_SEED, UCI};

fn temp_path(name: &str) -> PathBuf {
    let path = std::env::temp_dir()
        .join(format!("zobrist_keys_uci_{}", std::process::id()))
        .join(name);
    let _ = fs::remove_file(&path);
    path
}

fn host(name: &str) -> UCI {
    UCI::with_config(TableConfig::with_path(temp_path(name)))
}

/// Feed one line and return what the host printed.
fn send(uci: &mut UCI, line: &str) -> String {
    let mut out = Vec::new();
    uci.handle_line(line, &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

// ============================================================================
// Handshake Tests
// ============================================================================

#[test]
fn test_uci_handshake() {
    let mut uci = host("handshake.txt");
    let out = send(&mut uci, "uci");
    assert!(out.contains("id name ZobristKeys"));
    assert!(out.contains("option name TablePath"));
    assert!(out.contains("option name Seed type spin default 2361912 min 0 max 2147483647"));
    assert!(out.trim_end().ends_with("uciok"));
}

#[test]
fn test_isready_loads_table() {
    let mut uci = host("isready.txt");
    assert!(!uci.table().is_ready());

    let out = send(&mut uci, "isready");
    assert!(out.contains("info string table generated"));
    assert!(out.trim_end().ends_with("readyok"));
    assert!(uci.table().is_ready());

    // Second time round there is nothing left to report.
    assert_eq!(send(&mut uci, "isready"), "readyok\n");
}

#[test]
fn test_isready_reports_load_failure() {
    let path = temp_path("isready_dir");
    fs::create_dir_all(&path).unwrap();
    let mut uci = UCI::with_config(TableConfig::with_path(&path));

    let out = send(&mut uci, "isready");
    assert!(out.contains("info string error"));
    assert!(out.trim_end().ends_with("readyok"));
    assert!(!uci.table().is_ready());
}

#[test]
fn test_quit_stops_host() {
    let mut uci = host("quit.txt");
    let mut out = Vec::new();
    assert!(!uci.handle_line("quit", &mut out).unwrap());
    assert!(uci.handle_line("", &mut out).unwrap());
}

// ============================================================================
// Key Tests
// ============================================================================

#[test]
fn test_key_before_ready() {
    let mut uci = host("not_ready.txt");
    send(&mut uci, "position startpos");
    assert!(send(&mut uci, "key").contains("not ready"));
    assert_eq!(uci.key(), None);
}

#[test]
fn test_key_for_start_position() {
    let mut uci = host("start_key.txt");
    send(&mut uci, "isready");

    let expected = compute_full_key(&uci.board, &RandomConstantTable::generate(DEFAULT_SEED));
    assert_eq!(send(&mut uci, "key"), format!("key {}\n", expected));
}

#[test]
fn test_position_moves_update_key() {
    let mut uci = host("moves.txt");
    send(&mut uci, "isready");
    send(&mut uci, "position startpos moves e2e4 e7e5 g1f3 b8c6 f1c4 g8f6 e1g1");

    let table = RandomConstantTable::generate(DEFAULT_SEED);
    assert_eq!(uci.key(), Some(compute_full_key(&uci.board, &table)));
}

#[test]
fn test_position_fen_with_en_passant() {
    let mut uci = host("fen.txt");
    send(&mut uci, "isready");
    send(
        &mut uci,
        "position fen rnbqkbnr/ppp1pppp/8/3pP3/8/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 3 moves e5d6",
    );

    let table = RandomConstantTable::generate(DEFAULT_SEED);
    assert_eq!(uci.key(), Some(compute_full_key(&uci.board, &table)));
}

#[test]
fn test_position_stops_at_illegal_move() {
    let mut uci = host("illegal.txt");
    send(&mut uci, "isready");
    let out = send(&mut uci, "position startpos moves e2e4 e2e5 d7d5");
    assert_eq!(out, "info string illegal move e2e5\n");

    let start = Chess::default();
    let mv = "e2e4".parse::<UciMove>().unwrap().to_move(&start).unwrap();
    let expected = start.play(&mv).unwrap();
    assert_eq!(uci.board.board(), expected.board());
    assert_eq!(uci.board.turn(), expected.turn());
    let table = RandomConstantTable::generate(DEFAULT_SEED);
    assert_eq!(uci.key(), Some(compute_full_key(&expected, &table)));
}

#[test]
fn test_display_prints_fen_and_key() {
    let mut uci = host("display.txt");
    send(&mut uci, "isready");
    send(&mut uci, "position startpos moves e2e4");

    let out = send(&mut uci, "d");
    let mut lines = out.lines();
    assert_eq!(
        lines.next(),
        Some("Fen: rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1")
    );
    let key = uci.key().unwrap();
    assert_eq!(lines.next(), Some(format!("Key: {}", key).as_str()));
    assert_eq!(key.get(), 0x8edc88a05b81cc9e);
}

#[test]
fn test_display_before_ready() {
    let mut uci = host("display_unready.txt");
    let out = send(&mut uci, "d");
    assert!(out.starts_with("Fen: rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1\n"));
    assert!(out.contains("Key: (table not ready)"));
}

#[test]
fn test_position_before_ready_then_isready() {
    let mut uci = host("late_ready.txt");
    send(&mut uci, "position startpos moves d2d4 d7d5");
    assert_eq!(uci.key(), None);

    send(&mut uci, "isready");
    let table = RandomConstantTable::generate(DEFAULT_SEED);
    assert_eq!(uci.key(), Some(compute_full_key(&uci.board, &table)));
}

#[test]
fn test_ucinewgame_resets_key() {
    let mut uci = host("newgame.txt");
    send(&mut uci, "isready");
    let start = uci.key();
    send(&mut uci, "position startpos moves e2e4");
    assert_ne!(uci.key(), start);
    send(&mut uci, "ucinewgame");
    assert_eq!(uci.key(), start);
}

// ============================================================================
// Option Tests
// ============================================================================

#[test]
fn test_setoption_seed_drops_table() {
    let mut uci = host("seed.txt");
    send(&mut uci, "isready");
    let old = uci.key();

    send(&mut uci, "setoption name Seed value 42");
    assert_eq!(uci.config().seed, 42);
    assert!(!uci.table().is_ready());
    assert_eq!(uci.key(), None);

    // The persisted file still holds the old table, so reloading keeps the old key.
    send(&mut uci, "isready");
    assert_eq!(uci.key(), old);
}

#[test]
fn test_setoption_table_path() {
    let mut uci = host("path_a.txt");
    let other = temp_path("path_b.txt");
    send(&mut uci, &format!("setoption name TablePath value {}", other.display()));
    assert_eq!(uci.config().path, other);

    send(&mut uci, "isready");
    assert!(other.exists());
}

#[test]
fn test_setoption_seed_out_of_range_ignored() {
    let mut uci = host("seed_range.txt");
    send(&mut uci, "isready");

    send(&mut uci, &format!("setoption name Seed value {}", MAX_SEED + 1));
    assert_eq!(uci.config().seed, DEFAULT_SEED);
    assert!(uci.table().is_ready());

    send(&mut uci, &format!("setoption name Seed value {}", MAX_SEED));
    assert_eq!(uci.config().seed, MAX_SEED);
    assert!(!uci.table().is_ready());
}

#[test]
fn test_setoption_unchanged_keeps_table() {
    let mut uci = host("unchanged.txt");
    send(&mut uci, "isready");
    send(&mut uci, "setoption name Seed value 2361912");
    assert!(uci.table().is_ready());
}
