// vocabulary.rs - The name -> word registry

use std::collections::HashMap;
use std::rc::Rc;

use crate::lexer;
use crate::primitives::Primitive;
use crate::word::{Cell, Word};

/// Registry of every defined word. Lookup is by exact, case-sensitive name;
/// adding a word under an existing name replaces the mapping. A name that
/// parses as a numeric literal is never mapped, so it cannot shadow the
/// tokenizer; such words (the `0`/`1` constants) stay reachable only
/// through the handle returned at definition time.
pub struct Vocabulary {
    words: Vec<Word>,
    by_name: HashMap<String, usize>,
}

impl Vocabulary {
    /// A vocabulary pre-loaded with the native word set.
    pub fn new() -> Vocabulary {
        let mut vocab = Vocabulary {
            words: Vec::new(),
            by_name: HashMap::new(),
        };
        for &prim in Primitive::all() {
            vocab.add(Word::native(prim.name(), prim, prim.effect(), prim.flags()));
        }
        vocab
    }

    pub fn add(&mut self, word: Word) {
        let index = self.words.len();
        if let Some(name) = word.name() {
            if lexer::parse_number(name).is_none() {
                self.by_name.insert(name.to_string(), index);
            }
        }
        self.words.push(word);
    }

    pub fn lookup(&self, name: &str) -> Option<&Word> {
        self.by_name.get(name).map(|&i| &self.words[i])
    }

    /// The word owning a given compound body, identified by pointer.
    pub fn word_for_body(&self, body: &Rc<[Cell]>) -> Option<&Word> {
        self.words.iter().find(|w| match w.body() {
            Some(b) => Rc::ptr_eq(&b, body),
            None => false,
        })
    }

    pub fn word_for_primitive(&self, prim: Primitive) -> Option<&Word> {
        self.words.iter().find(|w| w.primitive() == Some(prim))
    }

    /// All registered words, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &Word> {
        self.words.iter()
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::new()
    }
}
