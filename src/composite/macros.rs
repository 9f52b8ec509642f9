//! Macro that synthesizes broadcast methods for an aggregate type.

/// Generate an aggregate type whose trait methods broadcast to members.
///
/// The macro declares a newtype over [`Composite`](crate::composite::Composite)
/// for the given trait object, a `new()` constructor that assembles and
/// validates the capability spec, `Deref`/`DerefMut` to the container,
/// and an implementation of the trait where every listed method invokes
/// the same-named method on each member in insertion order.
///
/// Plain methods broadcast and return nothing. Methods annotated with
/// `=> fold(init, f)` fold each member's return value and yield the last
/// folded value (`init` for an empty aggregate). Arguments are cloned for
/// each member call. Inherent methods added to the generated type shadow
/// the synthesized trait methods.
///
/// # Example
///
/// ```
/// use ensemble::composite;
///
/// trait Counter {
///     fn add(&mut self, amount: i64);
///     fn total(&self) -> i64;
/// }
///
/// struct Register(i64);
///
/// impl Counter for Register {
///     fn add(&mut self, amount: i64) {
///         self.0 += amount;
///     }
///     fn total(&self) -> i64 {
///         self.0
///     }
/// }
///
/// composite! {
///     struct CounterBank(dyn Counter) {
///         fn add(&mut self, amount: i64);
///         fn total(&self) -> i64 => fold(0, |acc, v| acc + v);
///     }
/// }
///
/// let mut bank = CounterBank::new().unwrap();
/// bank.push(Box::new(Register(0)));
/// bank.push(Box::new(Register(10)));
///
/// bank.add(5);
/// assert_eq!(bank.total(), 20);
/// ```
#[macro_export]
macro_rules! composite {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident(dyn $iface:path) {
            $($methods:tt)*
        }
    ) => {
        $(#[$meta])*
        $vis struct $name {
            inner: $crate::composite::Composite<dyn $iface>,
        }

        impl $name {
            /// Build the aggregate, validating its capability spec.
            $vis fn new() -> ::std::result::Result<Self, $crate::error::ConfigError> {
                #[allow(unused_mut)]
                let mut spec = $crate::spec::CapabilitySpec::new();
                $crate::composite!(@spec spec, $($methods)*);
                ::std::result::Result::Ok(Self {
                    inner: $crate::composite::Composite::new(spec.resolve()?),
                })
            }
        }

        impl ::std::ops::Deref for $name {
            type Target = $crate::composite::Composite<dyn $iface>;

            fn deref(&self) -> &Self::Target {
                &self.inner
            }
        }

        impl ::std::ops::DerefMut for $name {
            fn deref_mut(&mut self) -> &mut Self::Target {
                &mut self.inner
            }
        }

        impl $iface for $name {
            $crate::composite!(@methods $($methods)*);
        }
    };

    // Capability spec accumulation, one step per declared method.
    (@spec $spec:ident, ) => {};
    (@spec $spec:ident,
        fn $m:ident ( $($args:tt)* ); $($rest:tt)*
    ) => {
        $spec = $spec.method(stringify!($m));
        $crate::composite!(@spec $spec, $($rest)*);
    };
    (@spec $spec:ident,
        fn $m:ident ( $($args:tt)* ) -> $ret:ty => fold($init:expr, $fold:expr); $($rest:tt)*
    ) => {
        $spec = $spec.method(stringify!($m)).reduction(stringify!($m));
        $crate::composite!(@spec $spec, $($rest)*);
    };

    // Synthesized trait methods.
    (@methods ) => {};
    (@methods
        fn $m:ident ( &mut self $(, $a:ident : $aty:ty)* $(,)? ); $($rest:tt)*
    ) => {
        fn $m(&mut self $(, $a : $aty)*) {
            self.inner.broadcast_mut(|member| {
                member.$m($($a.clone()),*);
            });
        }
        $crate::composite!(@methods $($rest)*);
    };
    (@methods
        fn $m:ident ( &self $(, $a:ident : $aty:ty)* $(,)? ); $($rest:tt)*
    ) => {
        fn $m(&self $(, $a : $aty)*) {
            self.inner.broadcast(|member| {
                member.$m($($a.clone()),*);
            });
        }
        $crate::composite!(@methods $($rest)*);
    };
    (@methods
        fn $m:ident ( &self $(, $a:ident : $aty:ty)* $(,)? ) -> $ret:ty => fold($init:expr, $fold:expr); $($rest:tt)*
    ) => {
        fn $m(&self $(, $a : $aty)*) -> $ret {
            self.inner.reduce($init, |member| member.$m($($a.clone()),*), $fold)
        }
        $crate::composite!(@methods $($rest)*);
    };
    (@methods
        fn $m:ident ( &mut self $(, $a:ident : $aty:ty)* $(,)? ) -> $ret:ty => fold($init:expr, $fold:expr); $($rest:tt)*
    ) => {
        fn $m(&mut self $(, $a : $aty)*) -> $ret {
            self.inner.reduce_mut($init, |member| member.$m($($a.clone()),*), $fold)
        }
        $crate::composite!(@methods $($rest)*);
    };
}

#[cfg(test)]
mod tests {
    use crate::error::ConfigError;
    use std::cell::Cell;
    use std::rc::Rc;

    trait Accumulate {
        fn add(&mut self);
        fn subtract(&mut self);
    }

    struct One(Rc<Cell<i64>>);

    impl Accumulate for One {
        fn add(&mut self) {
            self.0.set(self.0.get() + 1);
        }
        fn subtract(&mut self) {
            self.0.set(self.0.get() - 1);
        }
    }

    struct Two(Rc<Cell<i64>>);

    impl Accumulate for Two {
        fn add(&mut self) {
            self.0.set(self.0.get() + 2);
        }
        fn subtract(&mut self) {
            self.0.set(self.0.get() - 2);
        }
    }

    crate::composite! {
        struct AccumulatorPool(dyn Accumulate) {
            fn add(&mut self);
            fn subtract(&mut self);
        }
    }

    #[test]
    fn broadcast_invokes_every_member() {
        let counter = Rc::new(Cell::new(0));
        let mut pool = AccumulatorPool::new().unwrap();
        pool.push(Box::new(One(Rc::clone(&counter))));
        pool.push(Box::new(Two(Rc::clone(&counter))));

        pool.add();
        assert_eq!(counter.get(), 3);

        pool.pop();
        pool.subtract();
        assert_eq!(counter.get(), 2);
    }

    #[test]
    fn generated_type_exposes_the_container_api() {
        let counter = Rc::new(Cell::new(0));
        let mut pool = AccumulatorPool::new().unwrap();
        pool.push_named("one", Box::new(One(Rc::clone(&counter))));

        assert_eq!(pool.len(), 1);
        assert!(pool.contains_name("one"));
        assert!(pool.supports("add"));
        assert!(!pool.supports("multiply"));
    }

    trait Sampler {
        fn get_int(&self) -> i64;
        fn get_string(&self) -> String;
    }

    struct Hello;

    impl Sampler for Hello {
        fn get_int(&self) -> i64 {
            10
        }
        fn get_string(&self) -> String {
            "Hello ".to_string()
        }
    }

    struct World;

    impl Sampler for World {
        fn get_int(&self) -> i64 {
            11
        }
        fn get_string(&self) -> String {
            "world!".to_string()
        }
    }

    crate::composite! {
        struct SamplerPool(dyn Sampler) {
            fn get_int(&self) -> i64 => fold(1, |acc, v| acc * v);
            fn get_string(&self) -> String => fold(String::new(), |acc, v: String| acc + &v);
        }
    }

    #[test]
    fn reductions_fold_member_return_values() {
        let mut pool = SamplerPool::new().unwrap();
        pool.push(Box::new(Hello));
        pool.push(Box::new(World));

        assert_eq!(pool.get_int(), 110);
        assert_eq!(pool.get_string(), "Hello world!");
    }

    #[test]
    fn reductions_over_an_empty_pool_yield_init() {
        let pool = SamplerPool::new().unwrap();
        assert_eq!(pool.get_int(), 1);
        assert_eq!(pool.get_string(), "");
    }

    #[test]
    fn reduction_methods_are_marked_in_the_catalog() {
        let pool = SamplerPool::new().unwrap();
        assert!(pool.capability().is_reduced("get_int"));
        assert!(pool.capability().is_reduced("get_string"));
    }

    crate::composite! {
        struct OverriddenPool(dyn Sampler) {
            fn get_int(&self) -> i64 => fold(0, |acc, v| acc + v);
            fn get_string(&self) -> String => fold(String::new(), |acc, v: String| acc + &v);
        }
    }

    impl OverriddenPool {
        fn get_int(&self) -> i64 {
            42
        }
    }

    #[test]
    fn inherent_methods_shadow_synthesized_ones() {
        let mut pool = OverriddenPool::new().unwrap();
        pool.push(Box::new(Hello));
        pool.push(Box::new(World));

        // Method resolution picks the inherent definition.
        assert_eq!(pool.get_int(), 42);
        // The synthesized method is still reachable through the trait.
        assert_eq!(Sampler::get_int(&pool), 21);
    }

    trait Nothing {}

    crate::composite! {
        struct EmptyPool(dyn Nothing) {}
    }

    #[test]
    fn empty_method_set_is_a_config_error() {
        assert!(matches!(EmptyPool::new(), Err(ConfigError::NoCapability)));
    }
}
