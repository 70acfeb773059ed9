//! The database of learned constraints and the strategies which decide which of them to forget.
mod activity;
mod age;
mod glucose;
mod lbd;
mod size;

use std::cmp::Ordering;
use std::fmt::Debug;

use enum_map::enum_map;
use enum_map::Enum;
use enum_map::EnumMap;
pub(crate) use lbd::LbdCalculator;

use crate::engine::constraints::Constraint;
use crate::engine::constraints::ConstraintAllocator;
use crate::engine::constraints::ConstraintReference;
use crate::engine::restarts::ConflictTimer;
use crate::engine::restarts::IncreasingConflictTimer;
use crate::engine::vocabulary::Vocabulary;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Enum)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum DeletionStrategyType {
    /// Forget the least active half.
    Activity,
    /// Forget the oldest half.
    Age,
    /// Forget the longest half, ties broken by activity.
    Size,
    /// Forget clauses with a large literal block distance, keeping glue clauses.
    #[default]
    Glucose,
    /// Like [`DeletionStrategyType::Glucose`], but the literal block distance is measured again
    /// whenever a clause propagates and the lower value is kept.
    GlucoseDynamic,
}

impl std::fmt::Display for DeletionStrategyType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeletionStrategyType::Activity => write!(f, "activity"),
            DeletionStrategyType::Age => write!(f, "age"),
            DeletionStrategyType::Size => write!(f, "size"),
            DeletionStrategyType::Glucose => write!(f, "glucose"),
            DeletionStrategyType::GlucoseDynamic => write!(f, "glucose-dynamic"),
        }
    }
}

/// The options of the learned constraint database.
#[derive(Debug, Clone, Copy)]
pub struct LearningOptions {
    pub deletion_strategy: DeletionStrategyType,
    /// The activity increment is divided by this factor after every conflict.
    pub activity_decay_factor: f64,
    /// When an activity exceeds this value every activity is scaled down.
    pub max_activity: f64,
    /// Clauses with a literal block distance up to this value are never deleted by the Glucose
    /// strategies.
    pub lbd_threshold: u32,
    /// The number of conflicts before the first reduction.
    pub reduce_first_bound: u64,
    /// How much the interval between reductions grows after each one.
    pub reduce_increment: u64,
}

impl Default for LearningOptions {
    fn default() -> Self {
        LearningOptions {
            deletion_strategy: DeletionStrategyType::Glucose,
            activity_decay_factor: 0.999,
            max_activity: 1e20,
            lbd_threshold: 2,
            reduce_first_bound: 2000,
            reduce_increment: 300,
        }
    }
}

/// What a deletion strategy may look at while reducing.
#[derive(Clone, Copy, Debug)]
pub(crate) struct ReductionContext<'a> {
    pub(crate) constraints: &'a ConstraintAllocator,
    pub(crate) vocabulary: &'a Vocabulary,
}

impl ReductionContext<'_> {
    /// Locked, binary, protected and restricted constraints are never deleted.
    pub(crate) fn is_deletable(&self, reference: ConstraintReference) -> bool {
        let constraint = self.constraints.get(reference);
        !constraint.metadata.protected
            && !constraint.metadata.restricted
            && constraint.size() > 2
            && !constraint.is_locked(self.vocabulary, reference)
    }
}

pub(crate) trait DeletionStrategy: Debug + Send {
    /// Resets internal bookkeeping for a problem with `num_variables` variables.
    fn init(&mut self, _num_variables: u32) {}

    /// Removes the constraints to forget from `learned` and returns them.
    fn reduce(
        &mut self,
        learned: &mut Vec<ConstraintReference>,
        context: ReductionContext<'_>,
    ) -> Vec<ConstraintReference>;

    fn on_clause_learning(&mut self, _constraint: &mut Constraint) {}

    /// Called for every learned constraint taking part in conflict analysis.
    fn on_conflict_analysis(&mut self, _constraint: &mut Constraint) {}

    /// Called when a learned constraint propagated a literal.
    fn on_propagation(
        &mut self,
        _constraint: &mut Constraint,
        _vocabulary: &Vocabulary,
        _lbd: &mut LbdCalculator,
    ) {
    }

    /// The timer deciding when [`DeletionStrategy::reduce`] is due.
    fn create_timer(&self, options: &LearningOptions) -> Box<dyn ConflictTimer> {
        Box::new(IncreasingConflictTimer::new(
            options.reduce_first_bound,
            options.reduce_increment,
        ))
    }
}

/// Sorts the deletable constraints worst first according to `compare` and forgets the first
/// `num_to_delete(num_deletable)` of them.
pub(crate) fn delete_worst(
    learned: &mut Vec<ConstraintReference>,
    context: ReductionContext<'_>,
    mut compare: impl FnMut(&Constraint, &Constraint) -> Ordering,
    num_to_delete: impl FnOnce(usize) -> usize,
) -> Vec<ConstraintReference> {
    let (mut candidates, mut kept): (Vec<_>, Vec<_>) = learned
        .iter()
        .copied()
        .partition(|&reference| context.is_deletable(reference));

    candidates.sort_by(|&first, &second| {
        compare(context.constraints.get(first), context.constraints.get(second))
    });
    let num_deleted = num_to_delete(candidates.len()).min(candidates.len());
    let deleted = candidates.drain(..num_deleted).collect::<Vec<_>>();

    kept.extend(candidates);
    kept.sort_by_key(|&reference| context.constraints.get(reference).metadata.age);
    *learned = kept;
    deleted
}

type DeletionStrategyConstructor = fn(&LearningOptions) -> Box<dyn DeletionStrategy>;

fn activity_deletion(_: &LearningOptions) -> Box<dyn DeletionStrategy> {
    Box::new(activity::ActivityDeletion)
}

fn age_deletion(_: &LearningOptions) -> Box<dyn DeletionStrategy> {
    Box::new(age::AgeDeletion)
}

fn size_deletion(_: &LearningOptions) -> Box<dyn DeletionStrategy> {
    Box::new(size::SizeDeletion)
}

fn glucose_deletion(options: &LearningOptions) -> Box<dyn DeletionStrategy> {
    Box::new(glucose::GlucoseDeletion::new(options.lbd_threshold, false))
}

fn glucose_dynamic_deletion(options: &LearningOptions) -> Box<dyn DeletionStrategy> {
    Box::new(glucose::GlucoseDeletion::new(options.lbd_threshold, true))
}

/// Owns the references to every learned constraint together with their shared bookkeeping:
/// clause activities, ages and literal block distances.
#[derive(Debug)]
pub(crate) struct LearnedConstraints {
    references: Vec<ConstraintReference>,
    strategy: Box<dyn DeletionStrategy>,
    options: LearningOptions,
    activity_increment: f64,
    num_learned: u64,
    lbd: LbdCalculator,
}

impl LearnedConstraints {
    pub(crate) fn new(options: LearningOptions) -> Self {
        let constructors: EnumMap<DeletionStrategyType, DeletionStrategyConstructor> = enum_map! {
            DeletionStrategyType::Activity => activity_deletion,
            DeletionStrategyType::Age => age_deletion,
            DeletionStrategyType::Size => size_deletion,
            DeletionStrategyType::Glucose => glucose_deletion,
            DeletionStrategyType::GlucoseDynamic => glucose_dynamic_deletion,
        };
        LearnedConstraints {
            references: Vec::new(),
            strategy: constructors[options.deletion_strategy](&options),
            options,
            activity_increment: 1.0,
            num_learned: 0,
            lbd: LbdCalculator::default(),
        }
    }

    pub(crate) fn create_timer(&self) -> Box<dyn ConflictTimer> {
        self.strategy.create_timer(&self.options)
    }

    pub(crate) fn init(&mut self, num_variables: u32) {
        self.strategy.init(num_variables);
    }

    pub(crate) fn len(&self) -> usize {
        self.references.len()
    }

    pub(crate) fn next_age(&mut self) -> u64 {
        self.num_learned += 1;
        self.num_learned
    }

    pub(crate) fn compute_lbd(&mut self, constraint: &Constraint, vocabulary: &Vocabulary) -> u32 {
        self.lbd.compute(constraint.literals(), vocabulary)
    }

    pub(crate) fn add(
        &mut self,
        reference: ConstraintReference,
        constraint: &mut Constraint,
        lbd: u32,
    ) {
        constraint.metadata.lbd = lbd;
        constraint.bump_activity(self.activity_increment);
        self.strategy.on_clause_learning(constraint);
        self.references.push(reference);
    }

    /// Bumps the activity of a learned constraint which took part in conflict analysis.
    ///
    /// Returns true if the activities grew too large, in which case
    /// [`LearnedConstraints::rescale_activities`] has to be called.
    pub(crate) fn on_conflict_analysis(&mut self, constraint: &mut Constraint) -> bool {
        if !constraint.is_learned() {
            return false;
        }
        constraint.bump_activity(self.activity_increment);
        self.strategy.on_conflict_analysis(constraint);
        constraint.metadata.activity > self.options.max_activity
    }

    pub(crate) fn on_propagation(&mut self, constraint: &mut Constraint, vocabulary: &Vocabulary) {
        if constraint.is_learned() {
            self.strategy
                .on_propagation(constraint, vocabulary, &mut self.lbd);
        }
    }

    pub(crate) fn rescale_activities(&mut self, constraints: &mut ConstraintAllocator) {
        let factor = self.options.max_activity.recip();
        for &reference in &self.references {
            constraints.get_mut(reference).metadata.activity *= factor;
        }
        self.activity_increment *= factor;
    }

    pub(crate) fn decay_activities(&mut self) {
        self.activity_increment /= self.options.activity_decay_factor;
    }

    /// Removes the constraints chosen by the deletion strategy from the database and returns
    /// them; the caller has to delete them from the arena.
    pub(crate) fn reduce(
        &mut self,
        constraints: &ConstraintAllocator,
        vocabulary: &Vocabulary,
    ) -> Vec<ConstraintReference> {
        self.strategy.reduce(
            &mut self.references,
            ReductionContext {
                constraints,
                vocabulary,
            },
        )
    }

    /// Drops the references of constraints which were deleted outside of a reduction.
    pub(crate) fn forget(&mut self, is_deleted: impl Fn(ConstraintReference) -> bool) {
        self.references.retain(|&reference| !is_deleted(reference));
    }

    pub(crate) fn clear(&mut self) {
        self.references.clear();
        self.activity_increment = 1.0;
    }
}
