use crate::hashing::incremental::key_after_move;
use crate::hashing::zobrist::PositionKey;
use crate::loader::{FileSource, LoadOrigin, TableConfig, ZobristTable};
use shakmaty::{fen::Fen, uci::UciMove, CastlingMode, Chess, EnPassantMode, Position};
use std::io::{self, BufRead, Write};
use vampirc_uci::{UciMessage, parser};

/// Largest value the `Seed` spin option accepts.
pub const MAX_SEED: u64 = i32::MAX as u64;

pub struct UCI {
    pub board: Chess,
    /// Key of `board`, kept up to date move by move once the table is ready.
    key: Option<PositionKey>,
    table: ZobristTable,
    config: TableConfig,
}

impl UCI {
    pub fn new() -> Self {
        Self::with_config(TableConfig::default())
    }

    pub fn with_config(config: TableConfig) -> Self {
        UCI {
            board: Chess::default(),
            key: None,
            table: ZobristTable::new(),
            config,
        }
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    /// Key of the current position, if the table is ready.
    pub fn key(&self) -> Option<PositionKey> {
        self.key
    }

    pub fn table(&self) -> &ZobristTable {
        &self.table
    }

    pub fn run(&mut self) {
        let stdin = io::stdin();
        let mut stdout = io::stdout();

        for line in stdin.lock().lines() {
            let line = match line {
                Ok(l) => l,
                Err(_) => break,
            };
            match self.handle_line(&line, &mut stdout) {
                Ok(true) => {}
                Ok(false) | Err(_) => break,
            }
            if stdout.flush().is_err() {
                break;
            }
        }
    }

    /// Handle one input line. Returns `false` once the host asked to quit.
    pub fn handle_line<W: Write>(&mut self, line: &str, out: &mut W) -> io::Result<bool> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(true);
        }

        match parser::parse_one(line) {
            UciMessage::Uci => self.cmd_uci(out)?,
            UciMessage::IsReady => {
                self.cmd_isready(out)?;
                writeln!(out, "readyok")?;
            }
            UciMessage::SetOption { name, value } => {
                self.apply_setoption(name.trim(), value.as_deref());
            }
            UciMessage::UciNewGame => self.cmd_ucinewgame(),
            UciMessage::Position { startpos, fen, moves } => {
                let fen_str = fen.as_ref().map(|f| f.as_str());
                let move_strs: Vec<String> = moves.iter().map(|m| m.to_string()).collect();
                let refs: Vec<&str> = move_strs.iter().map(String::as_str).collect();
                self.apply_position(startpos, fen_str, &refs, out)?;
            }
            UciMessage::Quit => return Ok(false),
            UciMessage::Unknown(ref s, _) => {
                let parts: Vec<&str> = s.split_whitespace().collect();
                if let Some(&first) = parts.first() {
                    match first {
                        "key" => self.cmd_key(out)?,
                        "d" | "display" => self.cmd_display(out)?,
                        _ => {}
                    }
                }
            }
            _ => {}
        }
        Ok(true)
    }

    fn cmd_uci<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "id name ZobristKeys {}", env!("CARGO_PKG_VERSION"))?;
        writeln!(out, "id author ZobristKeys Team")?;
        writeln!(out)?;
        writeln!(out, "option name TablePath type string default {}", self.config.path.display())?;
        writeln!(out, "option name Seed type spin default {} min 0 max {}", self.config.seed, MAX_SEED)?;
        writeln!(
            out,
            "option name RegenerateOnCorruption type check default {}",
            self.config.regenerate_on_corruption
        )?;
        writeln!(out, "uciok")
    }

    /// Load the table if needed and report how it was obtained.
    fn cmd_isready<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        if self.table.is_ready() {
            return Ok(());
        }

        let source = FileSource::new(self.config.clone());
        match self.table.ensure_ready(&source) {
            Ok(table) => {
                self.key = Some(crate::hashing::compute_full_key(&self.board, table));
                if let Some(origin) = self.table.origin() {
                    writeln!(out, "info string table {}", describe_origin(origin, &self.config))?;
                }
            }
            Err(e) => writeln!(out, "info string error: {}", e)?,
        }
        Ok(())
    }

    /// Options only take effect on the next load; changing one drops the current table.
    fn apply_setoption(&mut self, name: &str, value: Option<&str>) {
        let opt = name.to_lowercase().replace([' ', '_'], "");
        let value = value.unwrap_or("").trim();
        let before = self.config.clone();

        if opt == "tablepath" {
            if !value.is_empty() {
                self.config.path = value.into();
            }
        } else if opt == "seed" {
            match value.parse::<u64>() {
                Ok(seed) if seed <= MAX_SEED => self.config.seed = seed,
                _ => {}
            }
        } else if opt == "regenerateoncorruption" {
            self.config.regenerate_on_corruption = value.eq_ignore_ascii_case("true") || value == "1";
        }

        if self.config != before {
            self.table = ZobristTable::new();
            self.key = None;
        }
    }

    pub fn cmd_ucinewgame(&mut self) {
        self.set_board(true, None);
    }

    fn set_board(&mut self, startpos: bool, fen: Option<&str>) {
        if startpos {
            self.board = Chess::default();
        } else if let Some(fen_str) = fen {
            if let Ok(f) = fen_str.parse::<Fen>() {
                if let Ok(pos) = f.into_position::<Chess>(CastlingMode::Standard) {
                    self.board = pos;
                }
            }
        }
        self.key = self.table.full_key(&self.board).ok();
    }

    /// Set up a position and walk its moves, updating the key incrementally.
    /// Stops at the first move that is not legal in the position reached so far.
    fn apply_position<W: Write>(
        &mut self,
        startpos: bool,
        fen: Option<&str>,
        move_strs: &[&str],
        out: &mut W,
    ) -> io::Result<()> {
        self.set_board(startpos, fen);

        for &s in move_strs {
            let Some(mv) = self.parse_move(s) else {
                writeln!(out, "info string illegal move {}", s)?;
                break;
            };
            let Ok(next) = self.board.clone().play(&mv) else {
                writeln!(out, "info string illegal move {}", s)?;
                break;
            };
            if let Ok(table) = self.table.get() {
                self.key = self.key.map(|key| key_after_move(key, table, &self.board, &mv));
            }
            self.board = next;
            debug_assert_eq!(self.key, self.table.full_key(&self.board).ok());
        }
        Ok(())
    }

    pub fn parse_move(&self, move_str: &str) -> Option<shakmaty::Move> {
        let uci: UciMove = move_str.parse().ok()?;
        let mv = uci.to_move(&self.board).ok()?;
        if self.board.is_legal(&mv) { Some(mv) } else { None }
    }

    fn cmd_key<W: Write>(&self, out: &mut W) -> io::Result<()> {
        match self.key {
            Some(key) => writeln!(out, "key {}", key),
            None => writeln!(out, "info string error: random table is not ready"),
        }
    }

    fn cmd_display<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let fen = Fen::from_setup(self.board.clone().into_setup(EnPassantMode::Legal));
        writeln!(out, "Fen: {}", fen)?;
        match self.key {
            Some(key) => writeln!(out, "Key: {}", key),
            None => writeln!(out, "Key: (table not ready)"),
        }
    }
}

fn describe_origin(origin: &LoadOrigin, config: &TableConfig) -> String {
    let path = config.path.display();
    match origin {
        LoadOrigin::Persisted => format!("loaded from {}", path),
        LoadOrigin::Generated => format!("generated with seed {} and written to {}", config.seed, path),
        LoadOrigin::Regenerated { reason } => format!("regenerated into {} ({})", path, reason),
        LoadOrigin::Fetched => "fetched".to_string(),
        LoadOrigin::Seeded => format!("generated with seed {}", config.seed),
        LoadOrigin::Provided => "provided".to_string(),
    }
}

impl Default for UCI {
    fn default() -> Self { Self::new() }
}
