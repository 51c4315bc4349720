//! # Subject Filter Predicates
//!
//! A [`SubjectFilter`] is a conjunction of optional equality predicates over
//! the five hierarchy references of a subject. An absent predicate imposes no
//! constraint, so the empty filter matches every subject.

use uuid::Uuid;

/// The hierarchy references of one subject, as seen by a filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubjectRefs {
    /// Owning branch.
    pub branch_id: Uuid,
    /// Regulation the subject belongs to.
    pub regulation_id: Uuid,
    /// Optional specialization within the branch.
    pub sub_branch_id: Option<Uuid>,
    /// Year level.
    pub year_id: Uuid,
    /// Semester.
    pub semester_id: Uuid,
}

/// Optional equality predicates, combined with logical AND.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SubjectFilter {
    /// Restrict to one branch.
    pub branch_id: Option<Uuid>,
    /// Restrict to one regulation.
    pub regulation_id: Option<Uuid>,
    /// Restrict to one sub-branch. Subjects without a sub-branch never match.
    pub sub_branch_id: Option<Uuid>,
    /// Restrict to one year level.
    pub year_id: Option<Uuid>,
    /// Restrict to one semester.
    pub semester_id: Option<Uuid>,
}

impl SubjectFilter {
    /// True when no predicate is present.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Evaluate the filter against one subject.
    pub fn matches(&self, refs: &SubjectRefs) -> bool {
        fn eq(want: Option<Uuid>, have: Uuid) -> bool {
            want.map_or(true, |w| w == have)
        }

        eq(self.branch_id, refs.branch_id)
            && eq(self.regulation_id, refs.regulation_id)
            && eq(self.year_id, refs.year_id)
            && eq(self.semester_id, refs.semester_id)
            && self
                .sub_branch_id
                .map_or(true, |w| refs.sub_branch_id == Some(w))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn refs(branch: Uuid, year: Uuid) -> SubjectRefs {
        SubjectRefs {
            branch_id: branch,
            regulation_id: Uuid::nil(),
            sub_branch_id: None,
            year_id: year,
            semester_id: Uuid::nil(),
        }
    }

    #[test]
    fn empty_filter_matches_everything() {
        let f = SubjectFilter::default();
        assert!(f.is_empty());
        assert!(f.matches(&refs(Uuid::new_v4(), Uuid::new_v4())));
    }

    #[test]
    fn branch_and_year_intersect() {
        let (cse, ece) = (Uuid::new_v4(), Uuid::new_v4());
        let (y1, y2) = (Uuid::new_v4(), Uuid::new_v4());
        let subjects = [refs(cse, y1), refs(cse, y2), refs(ece, y1)];

        let by_branch = SubjectFilter {
            branch_id: Some(cse),
            ..Default::default()
        };
        let hits: Vec<_> = subjects.iter().filter(|s| by_branch.matches(s)).collect();
        assert_eq!(hits, vec![&subjects[0], &subjects[1]]);

        let by_branch_year = SubjectFilter {
            branch_id: Some(cse),
            year_id: Some(y2),
            ..Default::default()
        };
        let hits: Vec<_> = subjects
            .iter()
            .filter(|s| by_branch_year.matches(s))
            .collect();
        assert_eq!(hits, vec![&subjects[1]]);
    }

    #[test]
    fn sub_branch_predicate_excludes_subjects_without_one() {
        let sb = Uuid::new_v4();
        let f = SubjectFilter {
            sub_branch_id: Some(sb),
            ..Default::default()
        };
        let mut s = refs(Uuid::new_v4(), Uuid::new_v4());
        assert!(!f.matches(&s));
        s.sub_branch_id = Some(sb);
        assert!(f.matches(&s));
    }

    fn pick(pool: &[Uuid], i: usize) -> Uuid {
        pool[i % pool.len()]
    }

    proptest! {
        /// The combined filter equals the intersection of single-field filters.
        #[test]
        fn conjunction_is_intersection(
            rows in proptest::collection::vec((0usize..3, 0usize..3, 0usize..4, 0usize..3, 0usize..3), 0..24),
            wanted in (proptest::option::of(0usize..3), proptest::option::of(0usize..3), proptest::option::of(0usize..4), proptest::option::of(0usize..3), proptest::option::of(0usize..3)),
        ) {
            let pool: Vec<Uuid> = (0..4).map(|_| Uuid::new_v4()).collect();
            let subjects: Vec<SubjectRefs> = rows
                .iter()
                .map(|&(b, r, sb, y, s)| SubjectRefs {
                    branch_id: pick(&pool, b),
                    regulation_id: pick(&pool, r),
                    sub_branch_id: if sb == 3 { None } else { Some(pick(&pool, sb)) },
                    year_id: pick(&pool, y),
                    semester_id: pick(&pool, s),
                })
                .collect();

            let filter = SubjectFilter {
                branch_id: wanted.0.map(|i| pick(&pool, i)),
                regulation_id: wanted.1.map(|i| pick(&pool, i)),
                sub_branch_id: wanted.2.map(|i| pick(&pool, i)),
                year_id: wanted.3.map(|i| pick(&pool, i)),
                semester_id: wanted.4.map(|i| pick(&pool, i)),
            };

            let singles = [
                SubjectFilter { branch_id: filter.branch_id, ..Default::default() },
                SubjectFilter { regulation_id: filter.regulation_id, ..Default::default() },
                SubjectFilter { sub_branch_id: filter.sub_branch_id, ..Default::default() },
                SubjectFilter { year_id: filter.year_id, ..Default::default() },
                SubjectFilter { semester_id: filter.semester_id, ..Default::default() },
            ];

            for s in &subjects {
                let all = singles.iter().all(|f| f.matches(s));
                prop_assert_eq!(filter.matches(s), all);
            }
        }
    }
}
