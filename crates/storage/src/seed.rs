//! Demo catalogue: skills, questions, and a starter attempt history.

use chrono::{DateTime, Utc};
use prep_core::model::{DEMO_EMAIL, DEMO_USERNAME, Difficulty, User};

use crate::repository::{NewAttemptRecord, NewQuestionRecord, Storage, StorageError};

const DATA_STRUCTURES: &str = "Data Structures";
const ALGORITHMS: &str = "Algorithms";
const SYSTEM_DESIGN: &str = "System Design";
const BEHAVIORAL: &str = "Behavioral";

pub const SKILLS: [&str; 4] = [DATA_STRUCTURES, ALGORITHMS, SYSTEM_DESIGN, BEHAVIORAL];

/// `(text, skill name, difficulty)` for every seeded question.
#[rustfmt::skip]
pub const QUESTIONS: &[(&str, &str, Difficulty)] = &[
    ("Explain the difference between arrays and linked lists. When would you choose one over the other?", DATA_STRUCTURES, Difficulty::Easy),
    ("Describe how a hash table works, including how collisions are handled and typical time complexities.", DATA_STRUCTURES, Difficulty::Medium),
    ("What is the difference between a stack and a queue? Give a real‑world example of each.", DATA_STRUCTURES, Difficulty::Easy),
    ("Compare binary search trees, AVL trees, and red‑black trees in terms of balancing and performance.", DATA_STRUCTURES, Difficulty::Medium),
    ("Explain how a binary heap is implemented and how it supports priority queue operations.", DATA_STRUCTURES, Difficulty::Medium),
    ("What is the difference between depth‑first search (DFS) and breadth‑first search (BFS) on graphs?", DATA_STRUCTURES, Difficulty::Easy),
    ("How would you detect a cycle in a linked list? Discuss time and space complexity.", DATA_STRUCTURES, Difficulty::Medium),
    ("Explain the concept of dynamic arrays (array lists). How do they grow and what is the amortized cost of insertion?", DATA_STRUCTURES, Difficulty::Medium),
    ("Design a data structure to implement an LRU (Least Recently Used) cache.", DATA_STRUCTURES, Difficulty::Hard),
    ("How would you represent a graph in memory? Compare adjacency matrix and adjacency list.", DATA_STRUCTURES, Difficulty::Easy),
    ("What is a trie (prefix tree) and when is it useful?", DATA_STRUCTURES, Difficulty::Medium),
    ("Explain the difference between shallow copy and deep copy for complex data structures.", DATA_STRUCTURES, Difficulty::Easy),
    ("How do you find the kth smallest element in an unsorted array? Describe at least two approaches.", DATA_STRUCTURES, Difficulty::Hard),
    ("What are union‑find (disjoint set) data structures and where are they used?", DATA_STRUCTURES, Difficulty::Medium),
    ("Explain the concept of a segment tree and one problem it can solve efficiently.", DATA_STRUCTURES, Difficulty::Hard),
    ("Given a sorted array, how would you implement binary search? What is its time complexity?", ALGORITHMS, Difficulty::Easy),
    ("Compare time and space complexity of merge sort, quicksort, and bubble sort.", ALGORITHMS, Difficulty::Medium),
    ("Explain the two‑pointer technique and give an example problem where it is useful.", ALGORITHMS, Difficulty::Easy),
    ("What is dynamic programming? Explain with an example such as Fibonacci or knapsack.", ALGORITHMS, Difficulty::Medium),
    ("How would you detect if a string is a permutation of a palindrome?", ALGORITHMS, Difficulty::Medium),
    ("Describe Dijkstra’s algorithm for shortest paths. What are its time complexities with different data structures?", ALGORITHMS, Difficulty::Hard),
    ("Explain the difference between greedy algorithms and dynamic programming.", ALGORITHMS, Difficulty::Medium),
    ("How would you check if a binary tree is height‑balanced?", ALGORITHMS, Difficulty::Medium),
    ("Given an array, find the maximum subarray sum. Describe Kadane’s algorithm.", ALGORITHMS, Difficulty::Easy),
    ("What is backtracking? Explain with an example such as generating permutations or solving N‑Queens.", ALGORITHMS, Difficulty::Medium),
    ("Explain big‑O, big‑Theta, and big‑Omega notation with examples.", ALGORITHMS, Difficulty::Easy),
    ("How would you detect if two line segments intersect in 2D space?", ALGORITHMS, Difficulty::Hard),
    ("Explain the difference between lists, tuples, sets, and dictionaries in Python and when to use each.", BEHAVIORAL, Difficulty::Easy),
    ("How does Python’s list slicing work, and what is its complexity?", BEHAVIORAL, Difficulty::Medium),
    ("What is a list comprehension in Python and how does it differ from a normal for‑loop?", BEHAVIORAL, Difficulty::Easy),
    ("Explain how Python’s garbage collection and reference counting work at a high level.", BEHAVIORAL, Difficulty::Medium),
    ("What are decorators in Python and when might you use them?", BEHAVIORAL, Difficulty::Medium),
    ("Describe the difference between `@staticmethod`, `@classmethod`, and instance methods.", BEHAVIORAL, Difficulty::Medium),
    ("How would you handle exceptions in Python? Explain `try/except/else/finally`.", BEHAVIORAL, Difficulty::Easy),
    ("Explain the concept of generators in Python and how they differ from normal functions.", BEHAVIORAL, Difficulty::Medium),
    ("What are virtual environments in Python and why are they important?", BEHAVIORAL, Difficulty::Easy),
    ("How does Python’s GIL (Global Interpreter Lock) affect multithreading?", BEHAVIORAL, Difficulty::Hard),
    ("Design a URL shortener service. What components and data model would you use?", SYSTEM_DESIGN, Difficulty::Hard),
    ("How would you design a system like Instagram’s news feed?", SYSTEM_DESIGN, Difficulty::Hard),
    ("Explain how you would design a rate limiter for an API.", SYSTEM_DESIGN, Difficulty::Medium),
    ("Describe how you would design a distributed caching layer for a web application.", SYSTEM_DESIGN, Difficulty::Medium),
    ("What is sharding and how would you shard a large relational database?", SYSTEM_DESIGN, Difficulty::Hard),
    ("Explain the difference between vertical and horizontal scaling with examples.", SYSTEM_DESIGN, Difficulty::Easy),
    ("Tell me about a time you had to quickly learn a new technology to deliver a project.", BEHAVIORAL, Difficulty::Easy),
    ("Describe a challenging bug you fixed. How did you approach debugging it?", BEHAVIORAL, Difficulty::Medium),
    ("Tell me about a time you disagreed with a teammate or manager. How did you handle it?", BEHAVIORAL, Difficulty::Medium),
    ("Describe a project where you had to balance short‑term delivery with long‑term code quality.", BEHAVIORAL, Difficulty::Medium),
    ("Give an example of a time you improved the performance or reliability of a system.", BEHAVIORAL, Difficulty::Hard),];

/// Counts of rows created by one `seed_catalogue` run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SeedReport {
    pub questions: usize,
    pub attempts_created: usize,
}

/// Score given to the seeded attempt of the `position`-th question (1-based).
#[must_use]
pub fn starter_score(position: usize) -> i32 {
    let position = i32::try_from(position).unwrap_or(i32::MAX / 10);
    60_i32.saturating_add(position.saturating_mul(10))
}

/// Seed the demo user, skills, questions and one attempt per question.
///
/// Safe to run repeatedly: every row is fetched-or-created, and an attempt is
/// only added for a question the demo user has never attempted.
///
/// # Errors
///
/// Returns `StorageError` if any repository call fails.
pub async fn seed_catalogue(
    storage: &Storage,
    now: DateTime<Utc>,
) -> Result<(User, SeedReport), StorageError> {
    let user = storage
        .users
        .get_or_create_user(DEMO_USERNAME, DEMO_EMAIL)
        .await?;

    let mut skills = Vec::with_capacity(SKILLS.len());
    for name in SKILLS {
        skills.push(storage.skills.get_or_create_skill(name).await?);
    }

    let mut report = SeedReport::default();
    for (idx, (text, skill_name, difficulty)) in QUESTIONS.iter().enumerate() {
        let skill = skills
            .iter()
            .find(|s| s.name() == *skill_name)
            .ok_or(StorageError::NotFound)?;
        let question = storage
            .questions
            .get_or_create_question(NewQuestionRecord {
                text: (*text).to_owned(),
                skill_id: skill.id(),
                difficulty: *difficulty,
            })
            .await?;
        report.questions += 1;

        if !storage.attempts.has_attempt(user.id(), question.id()).await? {
            storage
                .attempts
                .append_attempt(NewAttemptRecord {
                    user_id: user.id(),
                    question_id: question.id(),
                    score: Some(starter_score(idx + 1)),
                    created_at: now,
                })
                .await?;
            report.attempts_created += 1;
        }
    }

    Ok((user, report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use prep_core::time::fixed_now;

    #[test]
    fn every_question_names_a_seeded_skill() {
        assert!(QUESTIONS.iter().all(|(_, skill, _)| SKILLS.contains(skill)));
        assert_eq!(QUESTIONS.len(), 48);
    }

    #[test]
    fn starter_scores_step_by_ten() {
        assert_eq!(starter_score(1), 70);
        assert_eq!(starter_score(2), 80);
    }

    #[tokio::test]
    async fn seeding_twice_adds_nothing_new() {
        let storage = Storage::in_memory();
        let (user, first) = seed_catalogue(&storage, fixed_now()).await.unwrap();
        assert_eq!(first.questions, QUESTIONS.len());
        assert_eq!(first.attempts_created, QUESTIONS.len());

        let (again, second) = seed_catalogue(&storage, fixed_now()).await.unwrap();
        assert_eq!(again.id(), user.id());
        assert_eq!(second.attempts_created, 0);
        assert_eq!(
            storage.attempts.count_attempts(user.id()).await.unwrap(),
            QUESTIONS.len() as u64
        );
        assert_eq!(storage.skills.list_skills().await.unwrap().len(), SKILLS.len());
    }
}
