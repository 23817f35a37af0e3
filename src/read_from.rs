use std::io::{self, Read};
use byteorder::{ReadBytesExt, LE};

/// Little-endian decoding of a fixed-size value.
pub trait ReadFrom: Sized {
    fn read_from<R: Read + ?Sized>(r: &mut R) -> io::Result<Self>;
}

macro_rules! read_byteorder {
    ($($ty:ty, $read_one:ident;)*) => {
        $(
            impl ReadFrom for $ty {
                fn read_from<R: Read + ?Sized>(r: &mut R) -> io::Result<Self> {
                    r.$read_one::<LE>()
                }
            }
        )*
    };
}

read_byteorder! {
    u16, read_u16;
    u32, read_u32;
    u64, read_u64;
    u128, read_u128;
}

impl ReadFrom for u8 {
    fn read_from<R: Read + ?Sized>(r: &mut R) -> io::Result<Self> {
        r.read_u8()
    }
}

impl<const N: usize> ReadFrom for [u8; N] {
    fn read_from<R: Read + ?Sized>(r: &mut R) -> io::Result<Self> {
        let mut buf = [0; N];
        r.read_exact(&mut buf)?;
        Ok(buf)
    }
}

macro_rules! read_tuple {
    ($($($A:ident)*;)*) => {
        $(
            impl<$($A: ReadFrom,)*> ReadFrom for ($($A,)*) {
                #[allow(non_snake_case)]
                fn read_from<R: Read + ?Sized>(r: &mut R) -> io::Result<Self> {
                    $( let $A: $A = $A::read_from(r)?; )*
                    Ok(($($A,)*))
                }
            }
        )*
    };
}

read_tuple! {
    A B;
    A B C;
    A B C D;
}


pub trait ReadExt: Read {
    fn read_one<T: ReadFrom>(&mut self) -> io::Result<T> {
        T::read_from(self)
    }

    fn read_many<T: ReadFrom>(&mut self, n: usize) -> io::Result<Vec<T>> {
        let mut v = Vec::with_capacity(n);
        for _ in 0 .. n {
            v.push(self.read_one()?);
        }
        Ok(v)
    }
}

impl<R: Read + ?Sized> ReadExt for R {}
