/*
Persistence
===========

Everything the engine remembers between sessions goes through one narrow
interface, `Repository`:

    load_table(name)         -> [(key, count)]      never fails
    save_table(name, rows)   -> Result               after every answer
    append_session(record)   -> Result               at session end
    list_sessions()          -> [SessionRecord]     never fails

`KeyValueRepository` implements it over any string key-value store. Values
are JSON text:

    "melodic.needs-practice"   [["0,2",3],[",4",1]]
    "melodic.confusions"       [["2,4",5]]
    "sessions"                 [{"timestamp":"...","exercise":"melodic",...}]

Reads are forgiving. A missing or garbled table is an empty table, and a
session-log entry that no longer deserializes or validates is skipped. Only
writes report errors, and the engine downgrades those to warnings.

The log is the exception on the write side: `append_session` refuses to
replace a log it cannot read, so earlier sessions are never lost to a
truncated file. `DirectoryStore` writes to `<key>.json.tmp` and renames it
over the target, so a crash mid-write leaves the previous value intact.

Vocabulary:
- Store: raw `get`/`put` of strings by key (`MemoryStore`, `DirectoryStore`)
- Repository: typed tables and session log on top of a store
*/

pub mod kv;
pub mod repository;

pub use kv::{DirectoryStore, KeyValueStore, MemoryStore};
pub use repository::{KeyValueRepository, Repository};

use crate::config::ExerciseKind;

/// Key of the session log
pub const SESSION_LOG_KEY: &str = "sessions";

/// Table name of the needs-practice weights for an exercise
pub fn needs_practice_table(exercise: ExerciseKind) -> String {
    format!("{}.needs-practice", exercise.as_str())
}

/// Table name of the confusion counts for an exercise
pub fn confusions_table(exercise: ExerciseKind) -> String {
    format!("{}.confusions", exercise.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_names_are_namespaced() {
        assert_eq!(needs_practice_table(ExerciseKind::Melodic), "melodic.needs-practice");
        assert_eq!(
            confusions_table(ExerciseKind::IntervalComparison),
            "interval-comparison.confusions"
        );
    }
}
