use crate::state::Step;

/// Call `step` until it stops returning [`Step::Expanded`]. Returns the
/// terminal step and how many expansions came before it.
pub(crate) fn drive(mut step: impl FnMut() -> Step) -> (Step, usize) {
    let mut yields = 0;
    loop {
        match step() {
            Step::Expanded => yields += 1,
            done => return (done, yields),
        }
    }
}
