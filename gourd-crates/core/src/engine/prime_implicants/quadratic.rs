use super::mandatory_variables;
use super::PrimeImplicantStrategy;
use super::Requirement;
use crate::engine::variables::Literal;
use crate::engine::vocabulary::Vocabulary;

/// Forgets every literal in turn and checks whether all requirements still hold; if one does not,
/// the literal is restored.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct QuadraticPrimeImplicant;

impl PrimeImplicantStrategy for QuadraticPrimeImplicant {
    fn compute(&mut self, model: &[Literal], requirements: &[Requirement]) -> Vec<Literal> {
        let mandatory = mandatory_variables(model, requirements);
        let mut vocabulary = Vocabulary::default();
        for &literal in model {
            vocabulary.ensure_pool(literal.get_variable().dimacs_id());
            vocabulary.satisfies(literal);
        }

        let holds = |vocabulary: &Vocabulary| {
            requirements.iter().all(|requirement| match requirement {
                Requirement::AtLeast { literals, degree } => {
                    Requirement::num_satisfied(literals, |literal| vocabulary.is_satisfied(literal))
                        >= *degree as usize
                }
                Requirement::Mandatory(_) => true,
            })
        };

        for &literal in model {
            let variable = literal.get_variable();
            if mandatory[variable] {
                continue;
            }
            // A forgotten variable satisfies neither of its literals.
            vocabulary.forgets(variable);
            if !holds(&vocabulary) {
                vocabulary.unassign(literal);
                vocabulary.satisfies(literal);
            }
        }

        model
            .iter()
            .copied()
            .filter(|&literal| vocabulary.is_satisfied(literal))
            .collect()
    }
}
