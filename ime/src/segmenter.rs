//! Incremental pinyin segmentation over an editable letter buffer.
//!
//! `PinyinBuffer` owns the raw letters the user has typed plus the token
//! list segmented out of them. A prefix of both can be fixed by a
//! selection; edits only touch the unfixed tail, and every edit re-segments
//! just that tail against the lexicon's syllable set.
//!
//! Segmentation is greedy longest-first with backtracking: whenever a
//! recognized syllable could also be extended into a longer one, a fork is
//! queued that commits the shorter reading, while the main scan keeps
//! extending. All completed readings then compete and one winner replaces
//! the unfixed tokens. Fork count is capped; past the cap no new branches
//! open, which leaves the greedy parse among the survivors.

use pinyin_ime_core::{Config, Error, Lexicon, MatchKind, Token, TokenKind};

/// The only permitted non-letter: an explicit syllable break.
pub const DELIMITER: char = '\'';

/// Editable pinyin buffer with a fixed/unfixed split and derived tokens.
#[derive(Debug, Clone)]
pub struct PinyinBuffer {
    buf: String,
    tokens: Vec<Token>,
    fixed_tokens: usize,
    fixed_letters: usize,
    capacity: usize,
    max_forks: usize,
}

impl PinyinBuffer {
    pub fn new(capacity: usize, max_forks: usize) -> Self {
        Self {
            buf: String::new(),
            tokens: Vec::new(),
            fixed_tokens: 0,
            fixed_letters: 0,
            capacity,
            max_forks,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.capacity, config.max_forks)
    }

    /// The raw letters, fixed prefix included.
    pub fn letters(&self) -> &str {
        &self.buf
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Tokens past the committed prefix; the region searches run over.
    pub fn unfixed_tokens(&self) -> &[Token] {
        &self.tokens[self.fixed_tokens..]
    }

    pub fn fixed_token_count(&self) -> usize {
        self.fixed_tokens
    }

    pub fn fixed_letters(&self) -> usize {
        self.fixed_letters
    }

    /// Letters not yet covered by a committed token.
    pub fn unfixed_letters(&self) -> usize {
        self.buf.len() - self.fixed_letters
    }

    // ---- editing ----

    /// Append letters. A push that would exceed capacity is a silent no-op.
    pub fn push_str(&mut self, lexicon: &Lexicon, text: &str) -> &[Token] {
        if !text.is_empty() && self.buf.len() + text.len() <= self.capacity {
            self.buf.push_str(text);
            self.resegment(lexicon);
        }
        self.unfixed_tokens()
    }

    /// Append one letter.
    pub fn push_char(&mut self, lexicon: &Lexicon, ch: char) -> &[Token] {
        let mut tmp = [0u8; 4];
        self.push_str(lexicon, ch.encode_utf8(&mut tmp))
    }

    /// Insert letters at `pos`. Fails inside the fixed region; insertion
    /// past the end or past capacity is a silent no-op.
    pub fn insert_str(&mut self, lexicon: &Lexicon, pos: usize, text: &str) -> Result<&[Token], Error> {
        if pos < self.fixed_letters {
            return Err(Error::FixedRegion);
        }
        if pos <= self.buf.len() && !text.is_empty() && self.buf.len() + text.len() <= self.capacity
        {
            self.buf.insert_str(pos, text);
            self.resegment(lexicon);
        }
        Ok(self.unfixed_tokens())
    }

    /// Remove up to `count` trailing letters, capped at the unfixed region.
    pub fn backspace(&mut self, lexicon: &Lexicon, count: usize) -> &[Token] {
        let count = count.min(self.unfixed_letters());
        if count == 0 {
            return self.unfixed_tokens();
        }
        self.buf.truncate(self.buf.len() - count);
        self.resegment(lexicon);
        self.unfixed_tokens()
    }

    /// Reset everything, fixed counters included.
    pub fn clear(&mut self) {
        self.buf.clear();
        self.tokens.clear();
        self.fixed_tokens = 0;
        self.fixed_letters = 0;
    }

    // ---- committing ----

    /// Commit the first `count` tokens. The fixed letter boundary moves to
    /// the start of the first remaining token (or the end of the buffer).
    pub fn fix_front_tokens(&mut self, count: usize) -> Result<(), Error> {
        if count > self.tokens.len() {
            return Err(Error::InvalidChoice);
        }
        self.fixed_tokens = count;
        self.fixed_letters = if count == self.tokens.len() {
            self.buf.len()
        } else {
            self.tokens[count].offset
        };
        Ok(())
    }

    /// The `fix_front_tokens` count that commits up through the last token
    /// of `span`, or 0 if `span` is not the current unfixed prefix.
    pub fn fix_count_for(&self, span: &[Token]) -> usize {
        let unfixed = self.unfixed_tokens();
        if span.is_empty() || span.len() > unfixed.len() {
            return 0;
        }
        if &unfixed[..span.len()] == span {
            self.fixed_tokens + span.len()
        } else {
            0
        }
    }

    // ---- segmentation ----

    fn resegment(&mut self, lexicon: &Lexicon) {
        self.tokens.truncate(self.fixed_tokens);
        if self.fixed_letters >= self.buf.len() {
            return;
        }
        let readings = self.enumerate(lexicon);
        if let Some(winner) = pick_winner(readings) {
            self.tokens.extend(winner);
        }
    }

    fn enumerate(&self, lexicon: &Lexicon) -> Vec<Vec<Token>> {
        let mut readings = Vec::new();
        let mut pending: Vec<Vec<Token>> = vec![Vec::new()];
        let mut forks = 0usize;
        while let Some(mut list) = pending.pop() {
            self.scan(lexicon, &mut list, &mut pending, &mut forks);
            readings.push(list);
        }
        readings
    }

    /// Run one scan to the end of the buffer, queueing a fork whenever a
    /// recognized syllable could also extend.
    fn scan(
        &self,
        lexicon: &Lexicon,
        list: &mut Vec<Token>,
        pending: &mut Vec<Vec<Token>>,
        forks: &mut usize,
    ) {
        let bytes = self.buf.as_bytes();
        let end = bytes.len();
        // A fork resumes right after the token it committed.
        let mut start = list
            .last()
            .map(|t| t.offset + t.text.len())
            .unwrap_or(self.fixed_letters);
        let mut cur = start;
        let mut pending_kind = TokenKind::Invalid;
        while cur < end {
            if bytes[cur] == DELIMITER as u8 {
                if cur > start {
                    list.push(Token::new(pending_kind, &self.buf[start..cur], start));
                }
                cur += 1;
                start = cur;
                pending_kind = TokenKind::Invalid;
                continue;
            }
            let text = &self.buf[start..cur + 1];
            match lexicon.syllable_match(text) {
                MatchKind::Miss => {
                    if cur > start {
                        // The accumulated run was a recognized prefix up to
                        // here; close it and retry the current letter alone.
                        list.push(Token::new(pending_kind, &self.buf[start..cur], start));
                        start = cur;
                    } else {
                        list.push(Token::new(TokenKind::Invalid, &self.buf[cur..cur + 1], cur));
                        cur += 1;
                        start = cur;
                    }
                    pending_kind = TokenKind::Invalid;
                }
                MatchKind::Partial => {
                    pending_kind = TokenKind::Initial;
                    cur += 1;
                    if cur == end {
                        list.push(Token::new(TokenKind::Initial, &self.buf[start..end], start));
                        start = end;
                    }
                }
                MatchKind::Extendible => {
                    let extendible = cur + 1 < end
                        && lexicon.syllable_match(&self.buf[start..cur + 2]) != MatchKind::Miss;
                    if extendible {
                        if *forks < self.max_forks {
                            *forks += 1;
                            let mut fork = list.clone();
                            fork.push(Token::new(TokenKind::Extendible, text, start));
                            pending.push(fork);
                        }
                        pending_kind = TokenKind::Extendible;
                        cur += 1;
                    } else {
                        list.push(Token::new(TokenKind::Extendible, text, start));
                        cur += 1;
                        start = cur;
                        pending_kind = TokenKind::Invalid;
                    }
                }
                MatchKind::Complete => {
                    list.push(Token::new(TokenKind::Complete, text, start));
                    cur += 1;
                    start = cur;
                    pending_kind = TokenKind::Invalid;
                }
            }
        }
    }
}

fn count_invalid(tokens: &[Token]) -> usize {
    tokens
        .iter()
        .filter(|t| t.kind == TokenKind::Invalid)
        .count()
}

/// Choose among completed readings: fewest `Invalid` tokens; then at the
/// first index where one side is `Invalid` and the other is not, the
/// non-`Invalid` side; then at the first length difference, the longer
/// token. Full ties keep the earliest reading, which is the greedy parse.
fn pick_winner(mut readings: Vec<Vec<Token>>) -> Option<Vec<Token>> {
    if readings.is_empty() {
        return None;
    }
    let mut winner = 0;
    let mut winner_invalid = count_invalid(&readings[0]);
    for i in 1..readings.len() {
        let invalid = count_invalid(&readings[i]);
        if invalid != winner_invalid {
            if invalid < winner_invalid {
                winner = i;
                winner_invalid = invalid;
            }
            continue;
        }
        for (challenger, best) in readings[i].iter().zip(&readings[winner]) {
            let c_invalid = challenger.kind == TokenKind::Invalid;
            let b_invalid = best.kind == TokenKind::Invalid;
            if c_invalid != b_invalid {
                if !c_invalid {
                    winner = i;
                }
                break;
            }
            if challenger.text.len() != best.text.len() {
                if challenger.text.len() > best.text.len() {
                    winner = i;
                }
                break;
            }
        }
    }
    Some(readings.swap_remove(winner))
}
