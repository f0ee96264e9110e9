use ternion_engine::errors::GameError;
use ternion_engine::rules::{validate_action, Action};

#[test]
fn check_facing_bet_is_invalid() {
    let err = validate_action(100, /*to_call*/ 5, /*min_raise*/ 2, Action::Check).unwrap_err();
    assert_eq!(err, GameError::CheckFacingBet);
}

#[test]
fn check_with_nothing_outstanding_is_valid() {
    let v = validate_action(100, 0, 2, Action::Check).unwrap();
    assert_eq!(v, Action::Check);
}

#[test]
fn raise_below_minimum_is_invalid() {
    let err = validate_action(100, 5, 4, Action::Raise(2)).unwrap_err();
    assert_eq!(
        err,
        GameError::InvalidRaiseAmount {
            amount: 2,
            minimum: 4
        }
    );
}

#[test]
fn over_stack_raise_becomes_all_in() {
    // stack 30, to_call 10: at most 20 beyond the call
    let v = validate_action(30, 10, 2, Action::Raise(50)).unwrap();
    assert_eq!(v, Action::Raise(20));
}

#[test]
fn short_all_in_raise_skips_minimum_check() {
    // 3 beyond the call is below the minimum of 4, but it is everything
    let v = validate_action(8, 5, 4, Action::Raise(3)).unwrap();
    assert_eq!(v, Action::Raise(3));
}

#[test]
fn raise_with_no_chips_beyond_call_is_invalid() {
    let err = validate_action(5, 5, 2, Action::Raise(1)).unwrap_err();
    assert_eq!(err, GameError::InsufficientChips);
}

#[test]
fn fold_and_call_are_always_accepted() {
    assert_eq!(validate_action(0, 50, 2, Action::Fold).unwrap(), Action::Fold);
    assert_eq!(validate_action(10, 50, 2, Action::Call).unwrap(), Action::Call);
}
