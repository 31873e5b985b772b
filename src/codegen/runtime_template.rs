//! Runtime support text: one template per dependency tag the emitter can
//! record, concatenated by
//! [`assemble`] into the prelude the caller writes ahead of the emitted
//! program. Each template is self-contained C++ so the assembled order
//! only has to respect each block's own `#include`s, not any ordering
//! between blocks.

use std::collections::BTreeSet;

/// Futures, the scope guard run at every block's entry, and `par`.
const FUTURES: &str = "\
#include <future>
#include <vector>
#include <functional>

namespace argon {

template <typename F>
auto par(F&& f) {
    return std::async(std::launch::async, std::forward<F>(f));
}

class ScopeGuard {
public:
    using Cleanup = std::function<void()>;
    void defer(Cleanup cleanup) { cleanups_.push_back(std::move(cleanup)); }
    ~ScopeGuard() {
        for (auto it = cleanups_.rbegin(); it != cleanups_.rend(); ++it) (*it)();
    }
private:
    std::vector<Cleanup> cleanups_;
};

} // namespace argon

using ArgonScopeGuard = argon::ScopeGuard;

";

/// `std::string` convenience — pulled in whenever a string literal or
/// the `str` primitive type is emitted.
const STRING: &str = "\
#include <string>

";

/// 128-bit signed/unsigned integers. Neither width has a portable native
/// type, so both are backed by a pair of 64-bit limbs with schoolbook
/// arithmetic; division fails (throws) on a zero divisor rather than
/// invoking undefined behavior.
const I128: &str = "\
#include <cstdint>
#include <stdexcept>
#include <string>

namespace argon {

class i128 {
public:
    i128() : hi_(0), lo_(0) {}
    i128(int64_t v) : hi_(v < 0 ? -1 : 0), lo_(static_cast<uint64_t>(v)) {}
    i128(int64_t hi, uint64_t lo) : hi_(hi), lo_(lo) {}

    i128 operator+(const i128& o) const {
        uint64_t lo = lo_ + o.lo_;
        int64_t carry = lo < lo_ ? 1 : 0;
        return i128(hi_ + o.hi_ + carry, lo);
    }
    i128 operator-(const i128& o) const { return *this + i128(-o.hi_ - (o.lo_ != 0 ? 1 : 0), ~o.lo_ + 1); }
    i128 operator-() const { return i128(0) - *this; }
    bool operator==(const i128& o) const { return hi_ == o.hi_ && lo_ == o.lo_; }
    bool operator<(const i128& o) const { return hi_ != o.hi_ ? hi_ < o.hi_ : lo_ < o.lo_; }

    i128 operator/(const i128& o) const {
        if (o.hi_ == 0 && o.lo_ == 0) throw std::domain_error(\"argon::i128 division by zero\");
        // Schoolbook long division over the 128-bit magnitude; sign
        // handled by the caller via two's-complement negation above.
        i128 quotient(0), remainder(0);
        for (int bit = 127; bit >= 0; --bit) {
            remainder = remainder + remainder;
            if (bit >= 64 ? (hi_ >> (bit - 64)) & 1 : (lo_ >> bit) & 1) remainder = remainder + i128(0, 1);
            if (!(remainder < o)) {
                remainder = remainder - o;
                if (bit >= 64) quotient = quotient + i128(int64_t(1) << (bit - 64), 0);
                else quotient = quotient + i128(0, uint64_t(1) << bit);
            }
        }
        return quotient;
    }

    double to_double() const { return static_cast<double>(hi_) * 18446744073709551616.0 + static_cast<double>(lo_); }
    std::string to_string() const { return std::to_string(hi_) + \":\" + std::to_string(lo_); }

private:
    int64_t hi_;
    uint64_t lo_;
};

using u128 = i128;

} // namespace argon

";

/// `std::views::iota`-backed ranges, used by the `to`/`to=` expression.
const RANGES: &str = "\
#include <ranges>

";

/// Functional ops on ordered containers: `filter`, `map`, `reduce`,
/// `map_pipe`, `accumulate` (the running-scan sibling recorded as a
/// judgment call in DESIGN.md).
const FUNCTIONAL: &str = "\
#include <algorithm>
#include <numeric>
#include <vector>

namespace argon {

template <typename C, typename F>
auto filter(const C& container, F&& pred) {
    C out;
    std::copy_if(container.begin(), container.end(), std::back_inserter(out), std::forward<F>(pred));
    return out;
}

template <typename C, typename F>
auto map(const C& container, F&& fn) {
    using Out = decltype(fn(*container.begin()));
    std::vector<Out> out;
    out.reserve(container.size());
    for (const auto& item : container) out.push_back(fn(item));
    return out;
}

template <typename C, typename F>
auto reduce(const C& container, F&& fn) {
    auto it = container.begin();
    auto acc = *it;
    for (++it; it != container.end(); ++it) acc = fn(acc, *it);
    return acc;
}

template <typename C, typename F>
C& map_pipe(C& container, F&& fn) {
    for (auto& item : container) item = fn(item);
    return container;
}

template <typename C, typename F>
auto accumulate(const C& container, F&& fn) {
    using Out = decltype(fn(*container.begin(), *container.begin()));
    std::vector<Out> out;
    out.reserve(container.size());
    auto it = container.begin();
    auto acc = *it;
    out.push_back(acc);
    for (++it; it != container.end(); ++it) {
        acc = fn(acc, *it);
        out.push_back(acc);
    }
    return out;
}

} // namespace argon

";

/// The `Try<T, E>` type backing `try expr` and `argon::try_catch`.
const TRY: &str = "\
#include <exception>
#include <optional>
#include <variant>

namespace argon {

template <typename T, typename E = std::exception_ptr>
class Try {
public:
    static Try ok(T value) { return Try(std::in_place_index<0>, std::move(value)); }
    static Try err(E error) { return Try(std::in_place_index<1>, std::move(error)); }

    bool is_ok() const { return slot_.index() == 0; }
    const T& unwrap() const { return std::get<0>(slot_); }
    T unwrap_or(T fallback) const { return is_ok() ? std::get<0>(slot_) : fallback; }
    const E& unwrap_err() const { return std::get<1>(slot_); }

    template <typename F>
    auto map(F&& fn) const -> Try<decltype(fn(std::get<0>(slot_))), E> {
        using U = decltype(fn(std::get<0>(slot_)));
        if (is_ok()) return Try<U, E>::ok(fn(std::get<0>(slot_)));
        return Try<U, E>::err(std::get<1>(slot_));
    }

private:
    template <typename... Args>
    Try(Args&&... args) : slot_(std::forward<Args>(args)...) {}
    std::variant<T, E> slot_;
};

template <typename F>
auto try_catch(F&& f) -> Try<decltype(f())> {
    using T = decltype(f());
    try {
        return Try<T>::ok(f());
    } catch (...) {
        return Try<T>::err(std::current_exception());
    }
}

} // namespace argon

";

/// `std::variant` — sum types and enum lowering.
const VARIANT: &str = "\
#include <variant>

";

/// `std::unique_ptr` — the `~T` owned-prefix type.
const OWNED: &str = "\
#include <memory>

";

/// `subrange`, used by the inclusive-upper-bound slice-index emission.
const SLICE: &str = "\
#include <ranges>

namespace argon {
using std::ranges::subrange;
}
using argon::subrange;

";

/// Pattern-match helpers: value/range/wildcard tests, destructuring
/// accessors, and the constructor-tag/type-narrowing runtime checks
/// `codegen::patterns` lowers `match` arms to.
const PATTERN: &str = "\
#include <variant>

namespace argon {

inline bool match_wildcard() { return true; }

template <typename T, typename V>
bool match_value(const T& scrutinee, const V& value) {
    return scrutinee == value;
}

template <typename T, typename Lo, typename Hi>
bool match_range(const T& scrutinee, const Lo& lo, const Hi& hi, bool inclusive) {
    return inclusive ? (scrutinee >= lo && scrutinee <= hi) : (scrutinee >= lo && scrutinee < hi);
}

template <typename C>
std::size_t destructure_len(const C& container) { return container.size(); }

template <typename C>
auto element_at(const C& container, std::size_t index) { return *(container.begin() + index); }

template <typename C>
auto rest_from(const C& container, std::size_t index) {
    return std::vector(container.begin() + index, container.end());
}

template <typename Variant, typename T>
bool match_constructor(const T& scrutinee) {
    return std::holds_alternative<Variant>(scrutinee);
}

template <typename Target, typename T>
bool holds(const T& scrutinee) {
    return std::holds_alternative<Target>(scrutinee);
}

template <typename Target, typename T>
const Target& narrow(const T& scrutinee) {
    return std::get<Target>(scrutinee);
}

} // namespace argon

";

/// Concatenates the header text for every dependency tag present, in a
/// fixed, deterministic order independent of the set's own (alphabetic)
/// iteration order — grouping the lower-level runtime pieces (i128,
/// string, ranges) ahead of the ones that build on them (slice,
/// pattern, functional, try, futures).
pub fn assemble(deps: &BTreeSet<&'static str>) -> String {
    const ORDER: &[(&str, &str)] = &[
        ("string", STRING),
        ("i128", I128),
        ("ranges", RANGES),
        ("variant", VARIANT),
        ("owned", OWNED),
        ("slice", SLICE),
        ("pattern", PATTERN),
        ("functional", FUNCTIONAL),
        ("try", TRY),
        ("futures", FUTURES),
    ];

    let mut out = String::new();
    for (tag, text) in ORDER {
        if deps.contains(tag) {
            out.push_str(text);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assemble_includes_only_requested_tags() {
        let mut deps = BTreeSet::new();
        deps.insert("futures");
        let text = assemble(&deps);
        assert!(text.contains("class ScopeGuard"));
        assert!(!text.contains("class i128"));
    }

    #[test]
    fn assemble_is_empty_for_no_dependencies() {
        assert_eq!(assemble(&BTreeSet::new()), "");
    }

    #[test]
    fn i128_division_by_zero_is_flagged_in_the_generated_source() {
        let mut deps = BTreeSet::new();
        deps.insert("i128");
        let text = assemble(&deps);
        assert!(text.contains("division by zero"));
    }
}
