/*
Sequence Generation
===================

A question is an ordered list of elements played to the user, of which the
first `length` positions are scored. Positions are generated strictly in
order because each one's candidates depend on the element chosen before it.

Vocabulary
----------

  candidates  The elements a position may take. Starts as the full pool and
              is narrowed by the opening and adjacency rules.

  adjacency   Inclusive bounds on the absolute distance between consecutive
              elements. Keeps melodies singable and leaps deliberate.

  bias        Probability of consulting the needs-practice weights for a
              position instead of picking uniformly. 0.7 once the table has
              more than two entries, 0.4 before that.


Per-Position Rules
------------------

    position 0   drop the previous question's opening element
                 (only when the pool has more than one candidate)

    position n   keep candidates within adjacency of element n-1;
                 if none survive, use the whole pool

    then         with probability `bias`, weighted draw among stored
                 (previous → candidate) keys; otherwise, or if no key
                 matches, uniform pick

The interval-comparison drill (`interval.rs`) builds its sequences
differently: cumulative offsets around one target interval.
*/

pub mod interval;
pub mod melodic;
pub mod question;

pub use interval::{Direction, IntervalGenerator, IntervalSequence};
pub use melodic::{GeneratedSequence, PickReason, SequenceGenerator};
pub use question::{AnswerCheck, Question};
